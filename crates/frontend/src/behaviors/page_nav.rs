use std::rc::Rc;

use eot_shared::markup;
use eot_shared::pages::{self, PageTable};
use eot_shared::{Result, SiteError};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::behaviors::popover;
use crate::dom;

const PAGE_NUM_ID: &str = "pageNumClickable";
const FORM_ID: &str = "new-page-num-form";

/// Navigate to `typed`, or tell the user it does not exist.
fn go_to_page(table: &PageTable, typed: &str) {
    match table.resolve(typed) {
        Ok(path) => {
            tracing::info!(page = typed, path = %path, "Navigating to page");
            dom::navigate(&path);
        }
        Err(SiteError::NotFound { key }) => dom::alert(&pages::not_found_message(&key)),
        Err(e) => tracing::warn!(error = %e, "Page lookup failed"),
    }
}

fn wire_form(popover: &Element, table: Rc<PageTable>) -> Result<()> {
    let form = dom::query_all(popover, &format!("#{}", FORM_ID))?
        .into_iter()
        .next()
        .ok_or_else(|| SiteError::missing_element(FORM_ID))?;
    let input = dom::query_all(&form, "input")?
        .into_iter()
        .next()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .ok_or_else(|| SiteError::precondition("page form has no input"))?;

    dom::on(&form, "submit", move |evt| {
        evt.stop_propagation();
        evt.prevent_default();
        go_to_page(&table, &input.value());
    });
    Ok(())
}

/// "Go to Page" popover on the clickable page number.
pub fn install(table: PageTable) -> Result<()> {
    let anchor = dom::require_element(PAGE_NUM_ID)?;
    let current = anchor.inner_html();
    tracing::debug!(pages = table.len(), current = %current, "Page navigation ready");

    let table = Rc::new(table);
    let source = anchor.clone();
    dom::on(&anchor, "click", move |_| {
        let shown = popover::toggle(&source, || {
            markup::popover("", "", &markup::page_nav_form(current.trim()))
        });
        let result = match shown {
            Ok(Some(element)) => wire_form(&element, table.clone()),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Page navigation popover failed");
        }
    });
    Ok(())
}
