use std::cell::RefCell;

use eot_shared::gallery::{self, GalleryItem, Lightbox};
use eot_shared::Result;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::dom;

const OVERLAY_ID: &str = "eot-lightbox";

thread_local! {
    static OPEN: RefCell<Option<Lightbox>> = const { RefCell::new(None) };
}

fn item_of(anchor: &Element) -> GalleryItem {
    GalleryItem {
        src: dom::attr(anchor, "href"),
        caption: anchor.get_attribute("data-sub-html"),
    }
}

/// Redraw the overlay from the open lightbox, hiding it when none is open.
fn render(overlay: &Element) {
    let markup = OPEN.with(|open| open.borrow().as_ref().map(Lightbox::markup));
    let result = match markup {
        Some(html) => {
            overlay.set_inner_html(&html);
            overlay.set_attribute("style", "display:flex;")
        }
        None => {
            overlay.set_inner_html("");
            overlay.set_attribute("style", "display:none;")
        }
    };
    if result.is_err() {
        tracing::warn!("Lightbox overlay could not be styled");
    }
}

fn update(overlay: &Element, action: impl FnOnce(&mut Option<Lightbox>)) {
    OPEN.with(|open| action(&mut open.borrow_mut()));
    render(overlay);
}

fn wire_container(container: &Element, overlay: &Element) -> Result<()> {
    let anchors = dom::query_all(container, "a")?;
    let items: Vec<GalleryItem> = anchors.iter().map(item_of).collect();
    for (index, anchor) in anchors.iter().enumerate() {
        let items = items.clone();
        let overlay = overlay.clone();
        dom::on(anchor, "click", move |evt| {
            evt.prevent_default();
            let items = items.clone();
            update(&overlay, |open| *open = Lightbox::open(items, index));
        });
    }
    Ok(())
}

/// Lightbox over every anchor of the gallery containers on the page.
pub fn install() -> Result<()> {
    let overlay = dom::create_element("div")?;
    overlay.set_id(OVERLAY_ID);
    overlay.set_class_name("lg-backdrop eot-lightbox");
    render(&overlay);
    dom::body()?
        .append_child(&overlay)
        .map_err(dom::js_error("attach lightbox"))?;

    let containers = dom::query_document(&gallery::container_selector())?;
    for container in &containers {
        wire_container(container, &overlay)?;
    }
    tracing::debug!(galleries = containers.len(), "Lightbox galleries wired");

    let target_overlay = overlay.clone();
    dom::on(&overlay, "click", move |evt| {
        let Some(target) = dom::event_target_element(&evt) else { return };
        let classes = target.class_list();
        if classes.contains("lg-next") {
            update(&target_overlay, |open| open.iter_mut().for_each(Lightbox::next));
        } else if classes.contains("lg-prev") {
            update(&target_overlay, |open| open.iter_mut().for_each(Lightbox::prev));
        } else if classes.contains("lg-close") || target == target_overlay {
            update(&target_overlay, |open| *open = None);
        }
    });

    let document = dom::document()?;
    dom::on(&document, "keydown", move |evt| {
        let Some(key) = evt.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if OPEN.with(|open| open.borrow().is_none()) {
            return;
        }
        match key.as_str() {
            "Escape" => update(&overlay, |open| *open = None),
            "ArrowRight" => update(&overlay, |open| open.iter_mut().for_each(Lightbox::next)),
            "ArrowLeft" => update(&overlay, |open| open.iter_mut().for_each(Lightbox::prev)),
            _ => {}
        }
    });
    Ok(())
}
