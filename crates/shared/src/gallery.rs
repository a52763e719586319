use crate::markup::escape_attr;

/// Container id prefixes whose anchors form a lightbox gallery.
pub const GALLERY_ID_PREFIXES: [&str; 2] = ["carousel-zoom", "archaeology-images"];

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub src: String,
    pub caption: Option<String>,
}

/// Position within one open gallery. Navigation wraps at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    items: Vec<GalleryItem>,
    index: usize,
}

impl Lightbox {
    /// `None` for an empty gallery; an out-of-range index opens the first item.
    pub fn open(items: Vec<GalleryItem>, index: usize) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let index = if index < items.len() { index } else { 0 };
        Some(Lightbox { items, index })
    }

    pub fn current(&self) -> &GalleryItem {
        &self.items[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.items.len() - 1) % self.items.len();
    }

    /// Overlay content for the current item.
    pub fn markup(&self) -> String {
        let item = self.current();
        let caption = item
            .caption
            .as_deref()
            .map(|c| format!(r#"<div class="lg-sub-html">{}</div>"#, c))
            .unwrap_or_default();
        format!(
            r#"<div class="lg-inner"><img class="lg-object lg-image" src="{}">{}</div><div class="lg-toolbar"><span class="lg-counter">{} / {}</span><button type="button" class="lg-close" aria-label="Close">&times;</button></div><button type="button" class="lg-prev lg-icon" aria-label="Previous">&lsaquo;</button><button type="button" class="lg-next lg-icon" aria-label="Next">&rsaquo;</button>"#,
            escape_attr(&item.src),
            caption,
            self.index + 1,
            self.items.len()
        )
    }
}

/// CSS selector matching every gallery container on a page.
pub fn container_selector() -> String {
    GALLERY_ID_PREFIXES
        .iter()
        .map(|p| format!(r#"[id^="{}"]"#, p))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n)
            .map(|i| GalleryItem {
                src: format!("img{}.jpg", i),
                caption: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_gallery_does_not_open() {
        assert!(Lightbox::open(vec![], 0).is_none());
    }

    #[test]
    fn test_next_wraps() {
        let mut lb = Lightbox::open(items(3), 2).unwrap();
        lb.next();
        assert_eq!(lb.index(), 0);
        assert_eq!(lb.current().src, "img0.jpg");
    }

    #[test]
    fn test_prev_wraps() {
        let mut lb = Lightbox::open(items(3), 0).unwrap();
        lb.prev();
        assert_eq!(lb.index(), 2);
    }

    #[test]
    fn test_out_of_range_opens_first() {
        let lb = Lightbox::open(items(2), 5).unwrap();
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn test_markup_counter_and_caption() {
        let mut gallery = items(2);
        gallery[1].caption = Some("<h4>Pit 3</h4>".to_string());
        let lb = Lightbox::open(gallery, 1).unwrap();
        let html = lb.markup();
        assert!(html.contains(r#"src="img1.jpg""#));
        assert!(html.contains(r#"<div class="lg-sub-html"><h4>Pit 3</h4></div>"#));
        assert!(html.contains("2 / 2"));
    }

    #[test]
    fn test_container_selector() {
        assert_eq!(
            container_selector(),
            r#"[id^="carousel-zoom"], [id^="archaeology-images"]"#
        );
    }
}
