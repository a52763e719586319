use dioxus::prelude::*;
use eot_shared::tooltip::TooltipPosition;

/// Hover label that follows the cursor. Rendered only while both a text and
/// a position are known.
#[component]
pub fn FeatureTooltip(text: Option<String>, position: Signal<Option<TooltipPosition>>) -> Element {
    let (Some(text), Some(pos)) = (text, *position.read()) else {
        return rsx! {};
    };

    rsx! {
        div { class: "map-tooltip", role: "tooltip", style: "{pos.css()}", "{text}" }
    }
}
