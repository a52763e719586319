use dioxus::prelude::*;
use eot_shared::controller::{ClickDisposition, LayerBinding, MapController, RenderedGroup};
use eot_shared::models::LayerName;
use eot_shared::tooltip::TooltipPosition;

use crate::components::map_view::SignalViewport;
use crate::coords;

/// CSS class carrying the stroke/fill of a layer (see `assets/map.css`).
fn layer_class(layer: LayerName) -> &'static str {
    match layer {
        LayerName::Grid => "layer layer-grid",
        LayerName::Postholes => "layer layer-postholes",
        LayerName::Palisade => "layer layer-palisade",
        LayerName::StructuresInternal => "layer layer-structures",
        LayerName::StructuresExternal => "layer layer-structures layer-structures-external",
        LayerName::Features => "layer layer-features",
    }
}

/// One layer of the map: a `<g>` with one path per feature.
#[component]
pub fn LayerGroup(
    group: RenderedGroup,
    binding: LayerBinding,
    controller: Signal<MapController>,
    viewport: SignalViewport,
    suppress_click: Signal<bool>,
    tooltip_pos: Signal<Option<TooltipPosition>>,
) -> Element {
    let mut controller = controller;
    let mut viewport = viewport;
    let mut tooltip_pos = tooltip_pos;

    let layer = group.layer;
    let class = if binding.click {
        format!("{} clickable", layer_class(layer))
    } else {
        layer_class(layer).to_string()
    };

    rsx! {
        g { id: "{layer}", class: "{class}",
            for feature in group.features {
                path {
                    key: "{feature.id}",
                    id: "{feature.id}",
                    d: "{feature.path}",
                    onclick: {
                        let id = feature.id.clone();
                        move |evt: Event<MouseData>| {
                            // The click that ends a drag is left to the background handler.
                            if *suppress_click.peek() {
                                return;
                            }
                            let disposition = controller.write().on_feature_clicked(layer, &id, &mut viewport);
                            if disposition == ClickDisposition::Handled {
                                evt.stop_propagation();
                            }
                        }
                    },
                    onmouseenter: {
                        let id = feature.id.clone();
                        move |evt: Event<MouseData>| {
                            if !binding.hover {
                                return;
                            }
                            if controller.write().on_feature_hovered(layer, &id) {
                                let client = evt.client_coordinates();
                                tooltip_pos.set(Some(TooltipPosition::near_cursor(
                                    client.x,
                                    client.y,
                                    coords::viewport_width(),
                                )));
                            }
                        }
                    },
                    onmousemove: move |evt: Event<MouseData>| {
                        if !binding.hover || tooltip_pos.peek().is_none() {
                            return;
                        }
                        let client = evt.client_coordinates();
                        tooltip_pos.set(Some(TooltipPosition::near_cursor(
                            client.x,
                            client.y,
                            coords::viewport_width(),
                        )));
                    },
                    onmouseleave: move |_| {
                        if !binding.hover {
                            return;
                        }
                        controller.write().on_hover_end();
                        tooltip_pos.set(None);
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layer_has_a_style_class() {
        for layer in LayerName::ALL {
            assert!(layer_class(layer).starts_with("layer layer-"));
        }
    }

    #[test]
    fn test_external_structures_share_structure_style() {
        assert!(layer_class(LayerName::StructuresExternal).contains("layer-structures "));
        assert!(layer_class(LayerName::StructuresExternal).ends_with("layer-structures-external"));
    }
}
