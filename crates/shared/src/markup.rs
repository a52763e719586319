//! HTML fragments injected by the page modules.
//!
//! Captions, reference text and details come from the site generator and are
//! trusted HTML; only values placed inside attributes are escaped.
use std::fmt::Write;

/// Escape a value for a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Image followed by its caption, as shown in figure modals and popovers.
pub fn figure(path: &str, caption: &str) -> String {
    format!(r#"<img src="{}"></img><br><br>{}"#, escape_attr(path), caption)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Image,
    Reference,
    Table,
}

impl ModalKind {
    pub const ALL: [ModalKind; 3] = [ModalKind::Image, ModalKind::Reference, ModalKind::Table];

    /// Anchor class inside the chapter text that opens this kind of modal.
    pub fn anchor_class(&self) -> &'static str {
        match self {
            ModalKind::Image => "a-img",
            ModalKind::Reference => "a-ref",
            ModalKind::Table => "a-table",
        }
    }

    /// Class the modal body carries while showing this kind.
    pub fn body_class(&self) -> &'static str {
        match self {
            ModalKind::Image => "img-modal-body",
            ModalKind::Reference => "ref-modal-body",
            ModalKind::Table => "table-modal-body",
        }
    }

    /// Body classes to drop when switching to this kind.
    pub fn other_body_classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        ModalKind::ALL
            .iter()
            .filter(move |k| *k != self)
            .map(|k| k.body_class())
    }
}

pub fn reference(author: &str, text: &str) -> String {
    format!("{}<br><p>{}</p>", author, text)
}

pub fn table(header: &str, table: &str) -> String {
    format!("<p>{}</p><pre>{}</pre>", header, table)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverKind {
    Figure,
    Details,
}

impl PopoverKind {
    pub fn anchor_class(&self) -> &'static str {
        match self {
            PopoverKind::Figure => "figure-popover",
            PopoverKind::Details => "details-popover",
        }
    }

    /// Class marking the popover elements of this kind so a close button can
    /// dismiss all of them.
    pub fn popover_class(&self) -> &'static str {
        match self {
            PopoverKind::Figure => "eot-figure-popover",
            PopoverKind::Details => "eot-details-popover",
        }
    }
}

/// Title bar shared by the artifact popovers.
pub fn popover_title() -> &'static str {
    r#"<span class="text-secondary">Details</span><button type="button" class="close popover-close">&times;</button>"#
}

/// Bootstrap popover shell, placed below its anchor.
pub fn popover(extra_class: &str, title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="popover bs-popover-bottom {}" role="tooltip"><div class="arrow"></div>"#,
        extra_class
    );
    if !title.is_empty() {
        let _ = write!(html, r#"<h3 class="popover-header">{}</h3>"#, title);
    }
    let _ = write!(html, r#"<div class="popover-body">{}</div></div>"#, body);
    html
}

/// "Go to Page" form prefilled with the current page number.
pub fn page_nav_form(current_page: &str) -> String {
    format!(
        r#"<form id="new-page-num-form" style="text-align:center;"><div><label for="pagenum"><b>Go to Page: </b></label></div><div><input type="text" style="width:8em;text-align:center" name="pagenum" value="{}"></div></form>"#,
        escape_attr(current_page)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_markup() {
        assert_eq!(
            figure("../imgs/fig1.jpg", "Figure 1. <i>Pipe</i>"),
            r#"<img src="../imgs/fig1.jpg"></img><br><br>Figure 1. <i>Pipe</i>"#
        );
    }

    #[test]
    fn test_figure_escapes_path_only() {
        let html = figure(r#"a"b.jpg"#, "<b>c</b>");
        assert!(html.starts_with(r#"<img src="a&quot;b.jpg">"#));
        assert!(html.ends_with("<b>c</b>"));
    }

    #[test]
    fn test_reference_and_table_markup() {
        assert_eq!(reference("Ward", "1987"), "Ward<br><p>1987</p>");
        assert_eq!(table("Table 3", "a  b"), "<p>Table 3</p><pre>a  b</pre>");
    }

    #[test]
    fn test_other_body_classes() {
        let others: Vec<&str> = ModalKind::Reference.other_body_classes().collect();
        assert_eq!(others, vec!["img-modal-body", "table-modal-body"]);
    }

    #[test]
    fn test_popover_shell() {
        let html = popover("eot-figure-popover", popover_title(), "body");
        assert!(html.starts_with(r#"<div class="popover bs-popover-bottom eot-figure-popover""#));
        assert!(html.contains(r#"<h3 class="popover-header"><span class="text-secondary">Details</span>"#));
        assert!(html.ends_with(r#"<div class="popover-body">body</div></div>"#));
    }

    #[test]
    fn test_popover_without_title() {
        let html = popover("page-nav-popover", "", "form");
        assert!(!html.contains("popover-header"));
    }

    #[test]
    fn test_page_nav_form_prefill() {
        let html = page_nav_form("42");
        assert!(html.contains(r#"name="pagenum" value="42""#));
        assert!(html.contains("Go to Page: "));
    }
}
