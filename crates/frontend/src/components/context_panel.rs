use dioxus::prelude::*;
use eot_shared::controller::Selection;

/// Name and link of the last clicked feature.
#[component]
pub fn ContextPanel(selection: Selection) -> Element {
    let class = selection.highlight.css_class();

    rsx! {
        div { class: "map-context",
            a { id: "context_href", href: "{selection.href}",
                span { id: "context_name", class: "{class}", "{selection.text}" }
            }
        }
    }
}
