use eot_shared::tooltip::PointerCapability;
use eot_shared::{Result, SiteError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, Window};

// ---------------------------------------------------------------------------
// Lookups (fail with a precondition violation)
// ---------------------------------------------------------------------------

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SiteError::precondition("no window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| SiteError::precondition("no document"))
}

pub fn require_element(id: &str) -> Result<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::missing_element(id))
}

pub fn body() -> Result<Element> {
    document()?
        .body()
        .map(Element::from)
        .ok_or_else(|| SiteError::missing_element("body"))
}

/// Text of a `<script type="application/json">` block.
pub fn json_script(id: &str) -> Result<String> {
    require_element(id)?
        .text_content()
        .ok_or_else(|| SiteError::precondition(format!("#{} is empty", id)))
}

pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = root
        .query_selector_all(selector)
        .map_err(|_| SiteError::precondition(format!("invalid selector {}", selector)))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_document(selector: &str) -> Result<Vec<Element>> {
    let root = document()?
        .document_element()
        .ok_or_else(|| SiteError::precondition("no document element"))?;
    query_all(&root, selector)
}

pub fn elements_by_class(root: &Element, class: &str) -> Vec<Element> {
    let collection = root.get_elements_by_class_name(class);
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

pub fn attr(element: &Element, name: &str) -> String {
    element.get_attribute(name).unwrap_or_default()
}

/// Map a failed DOM call to a precondition violation describing `what`.
pub fn js_error(what: &str) -> impl FnOnce(JsValue) -> SiteError + '_ {
    move |e| SiteError::precondition(format!("{}: {:?}", what, e))
}

pub fn create_element(tag: &str) -> Result<Element> {
    document()?
        .create_element(tag)
        .map_err(js_error("create element"))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Attach a listener for the lifetime of the page.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::warn!(event, "Failed to attach listener");
    }
    closure.forget();
}

pub fn event_target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

// ---------------------------------------------------------------------------
// Browser services
// ---------------------------------------------------------------------------

/// Primary pointer type from the `(pointer: …)` media queries.
pub fn pointer_capability() -> PointerCapability {
    let matches = |query: &str| {
        web_sys::window()
            .and_then(|w| w.match_media(query).ok().flatten())
            .map(|mql| mql.matches())
            .unwrap_or(false)
    };
    PointerCapability::from_media(matches("(pointer: coarse)"), matches("(pointer: fine)"))
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

/// Open `path` in the current tab.
pub fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(path, "_self").is_err() {
            tracing::warn!(path, "Navigation failed");
        }
    }
}

/// Page scroll offsets, for positioning absolutely placed overlays.
pub fn scroll_offsets() -> (f64, f64) {
    web_sys::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0))
}
