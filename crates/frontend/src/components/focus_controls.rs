use dioxus::prelude::*;
use eot_shared::controller::{FocusMode, MapController};

/// Radio-style button group selecting the map's focus mode.
#[component]
pub fn FocusControls(focus: FocusMode, controller: Signal<MapController>) -> Element {
    let mut controller = controller;

    rsx! {
        div { class: "btn-group btn-group-sm focus-controls",
            role: "group",
            "aria-label": "Map focus",
            for mode in FocusMode::ALL {
                button {
                    key: "{mode.control_id()}",
                    id: mode.control_id(),
                    r#type: "button",
                    class: if mode == focus { "btn btn-secondary active" } else { "btn btn-outline-secondary" },
                    onclick: move |_| controller.write().set_focus(mode),
                    "{mode.label()}"
                }
            }
        }
    }
}
