use eot_shared::markup::{self, ModalKind};
use eot_shared::Result;
use web_sys::Element;

use crate::dom;

const CONTENTS_ID: &str = "text-chapter-contents";
const MODAL_BODY_ID: &str = "modal-body";
const TABLE_IMG_BODY_ID: &str = "table-img-modal-body";

fn figure_of(anchor: &Element) -> String {
    markup::figure(
        &dom::attr(anchor, "data-figure-path"),
        &dom::attr(anchor, "data-figure-caption"),
    )
}

fn content(kind: ModalKind, anchor: &Element) -> String {
    match kind {
        ModalKind::Image => figure_of(anchor),
        ModalKind::Reference => markup::reference(
            &dom::attr(anchor, "data-author"),
            &dom::attr(anchor, "data-ref-text"),
        ),
        ModalKind::Table => markup::table(
            &dom::attr(anchor, "data-table-header"),
            &dom::attr(anchor, "data-table-string"),
        ),
    }
}

/// Fill the shared modal body for `kind` and switch its style class.
fn show(kind: ModalKind, anchor: &Element, body: &Element, table_img_body: &Element) -> Result<()> {
    body.set_inner_html(&content(kind, anchor));
    let classes = body.class_list();
    classes
        .add_1(kind.body_class())
        .map_err(dom::js_error("modal body class"))?;
    for other in kind.other_body_classes() {
        classes
            .remove_1(other)
            .map_err(dom::js_error("modal body class"))?;
    }

    // Figure links inside a table open in the nested image modal.
    if kind == ModalKind::Table {
        for link in dom::query_all(body, "a")? {
            let source = link.clone();
            let target = table_img_body.clone();
            dom::on(&link, "click", move |_| {
                target.set_inner_html(&figure_of(&source));
            });
        }
    }
    Ok(())
}

/// Image, reference and table modals of a text chapter.
pub fn install() -> Result<()> {
    let contents = dom::require_element(CONTENTS_ID)?;
    let body = dom::require_element(MODAL_BODY_ID)?;
    let table_img_body = dom::require_element(TABLE_IMG_BODY_ID)?;

    for kind in ModalKind::ALL {
        let anchors = dom::elements_by_class(&contents, kind.anchor_class());
        tracing::debug!(kind = ?kind, anchors = anchors.len(), "Wiring modal anchors");
        for anchor in anchors {
            let source = anchor.clone();
            let body = body.clone();
            let table_img_body = table_img_body.clone();
            dom::on(&anchor, "click", move |_| {
                if let Err(e) = show(kind, &source, &body, &table_img_body) {
                    tracing::warn!(error = %e, "Modal update failed");
                }
            });
        }
    }
    Ok(())
}
