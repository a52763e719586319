use std::sync::atomic::{AtomicU32, Ordering};

use eot_shared::{Result, SiteError};
use web_sys::Element;

use crate::dom;

/// Anchor attribute naming the id of its open popover.
const POPOVER_ATTR: &str = "data-popover-id";

static NEXT_POPOVER: AtomicU32 = AtomicU32::new(0);

/// Inline style placing a popover centred under an anchor.
///
/// `left`/`bottom`/`width` are the anchor's client rect; scroll offsets turn
/// them into document coordinates since popovers live directly under `body`.
pub fn below_anchor_style(left: f64, bottom: f64, width: f64, scroll_x: f64, scroll_y: f64) -> String {
    format!(
        "position:absolute;top:{}px;left:{}px;transform:translateX(-50%);display:block;",
        bottom + scroll_y,
        left + width / 2.0 + scroll_x
    )
}

/// Show the popover of `anchor`, or hide it if it is already open.
///
/// `build` produces the popover markup and is only called when showing.
/// Returns the new popover element when one was shown.
pub fn toggle(anchor: &Element, build: impl FnOnce() -> String) -> Result<Option<Element>> {
    let document = dom::document()?;
    if let Some(id) = anchor.get_attribute(POPOVER_ATTR) {
        if let Some(open) = document.get_element_by_id(&id) {
            open.remove();
            return Ok(None);
        }
    }

    let holder = dom::create_element("div")?;
    holder.set_inner_html(&build());
    let popover = holder
        .first_element_child()
        .ok_or_else(|| SiteError::precondition("empty popover markup"))?;

    let id = format!("eot-popover-{}", NEXT_POPOVER.fetch_add(1, Ordering::Relaxed));
    popover.set_id(&id);

    let rect = anchor.get_bounding_client_rect();
    let (scroll_x, scroll_y) = dom::scroll_offsets();
    popover
        .set_attribute(
            "style",
            &below_anchor_style(rect.left(), rect.bottom(), rect.width(), scroll_x, scroll_y),
        )
        .map_err(dom::js_error("style popover"))?;

    dom::body()?
        .append_child(&popover)
        .map_err(dom::js_error("attach popover"))?;
    anchor
        .set_attribute(POPOVER_ATTR, &id)
        .map_err(dom::js_error("tag popover anchor"))?;
    Ok(Some(popover))
}

/// Remove every open popover carrying `class`.
pub fn hide_all(class: &str) -> Result<()> {
    for popover in dom::query_document(&format!(".{}", class))? {
        popover.remove();
    }
    Ok(())
}
