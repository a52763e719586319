use eot_shared::markup::{self, PopoverKind};
use eot_shared::Result;
use web_sys::Element;

use crate::behaviors::popover;
use crate::dom;

fn content(kind: PopoverKind, anchor: &Element) -> String {
    let body = match kind {
        PopoverKind::Figure => markup::figure(
            &dom::attr(anchor, "data-figure-path"),
            &dom::attr(anchor, "data-figure-caption"),
        ),
        PopoverKind::Details => dom::attr(anchor, "data-details-html"),
    };
    markup::popover(kind.popover_class(), markup::popover_title(), &body)
}

fn wire(kind: PopoverKind) -> Result<usize> {
    let anchors = dom::query_document(&format!(".{}", kind.anchor_class()))?;
    for anchor in &anchors {
        let target = anchor.clone();
        dom::on(anchor, "click", move |evt| {
            evt.prevent_default();
            if let Err(e) = popover::toggle(&target, || content(kind, &target)) {
                tracing::warn!(error = %e, "Artifact popover failed");
            }
        });
    }
    Ok(anchors.len())
}

/// Figure and details popovers of the artifact appendix. The close button in
/// a popover's title hides every open popover of the same kind.
pub fn install() -> Result<()> {
    let figures = wire(PopoverKind::Figure)?;
    let details = wire(PopoverKind::Details)?;
    tracing::debug!(figures, details, "Artifact popovers wired");

    let document = dom::document()?;
    dom::on(&document, "click", |evt| {
        let Some(target) = dom::event_target_element(&evt) else { return };
        let Ok(Some(close)) = target.closest(".popover-close") else { return };
        for kind in [PopoverKind::Figure, PopoverKind::Details] {
            let inside = close
                .closest(&format!(".{}", kind.popover_class()))
                .ok()
                .flatten()
                .is_some();
            if inside {
                if let Err(e) = popover::hide_all(kind.popover_class()) {
                    tracing::warn!(error = %e, "Closing popovers failed");
                }
            }
        }
    });
    Ok(())
}

