use std::sync::Arc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use eot_shared::config::MapConfig;
use eot_shared::controller::{MapController, Viewport};
use eot_shared::geometry::ZoomTransform;
use eot_shared::models::{Excavation, MetadataTable};
use eot_shared::tooltip::TooltipPosition;
use gloo_timers::future::TimeoutFuture;

use crate::components::context_panel::ContextPanel;
use crate::components::feature_tooltip::FeatureTooltip;
use crate::components::focus_controls::FocusControls;
use crate::components::layer_group::LayerGroup;
use crate::coords;
use crate::dom;

const SVG_ID: &str = "map-svg";

/// Drag threshold in pixels; movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold, larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The zoom group's transform, animated with a CSS transition.
///
/// Every transition bumps `generation`; the timer that ends a transition only
/// clears the animating flag if no newer one started meanwhile.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalViewport {
    transform: Signal<ZoomTransform>,
    transition_ms: Signal<Option<u32>>,
    generation: Signal<u64>,
}

impl SignalViewport {
    fn new() -> Self {
        SignalViewport {
            transform: Signal::new(ZoomTransform::IDENTITY),
            transition_ms: Signal::new(None),
            generation: Signal::new(0),
        }
    }

    /// Immediate update for direct manipulation; cancels any running transition.
    fn jump(&mut self, target: ZoomTransform) {
        *self.generation.write() += 1;
        self.transition_ms.set(None);
        self.transform.set(target);
    }

    fn current(&self) -> ZoomTransform {
        *self.transform.peek()
    }
}

impl Viewport for SignalViewport {
    fn animate_transform(&mut self, target: ZoomTransform, duration_ms: u32) {
        let generation = {
            let mut g = self.generation.write();
            *g += 1;
            *g
        };
        self.transition_ms.set(Some(duration_ms));
        self.transform.set(target);

        let mut transition = self.transition_ms;
        let current = self.generation;
        spawn(async move {
            TimeoutFuture::new(duration_ms).await;
            if *current.peek() == generation {
                transition.set(None);
            }
        });
    }
}

/// Inline style of the zoom group.
fn transform_style(t: &ZoomTransform, transition_ms: Option<u32>) -> String {
    let mut style = format!(
        "transform: translate({}px, {}px) scale({}); transform-origin: 0 0;",
        t.x, t.y, t.k
    );
    if let Some(ms) = transition_ms {
        style.push_str(&format!(" transition: transform {}ms ease-in-out;", ms));
    }
    style
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(dataset: Arc<Excavation>, metadata: Arc<MetadataTable>, config: MapConfig) -> Element {
    let width = config.width;
    let height = config.height;
    let min_zoom = config.min_zoom;
    let max_zoom = config.max_zoom;

    let mut controller = use_signal(move || {
        MapController::new(dataset, metadata, config, dom::pointer_capability())
    });
    let mut viewport = use_hook(SignalViewport::new);
    let tooltip_pos = use_signal(|| None::<TooltipPosition>);

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_transform = use_signal(|| ZoomTransform::IDENTITY);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_transform = use_signal(|| ZoomTransform::IDENTITY);
    let mut is_pinching = use_signal(|| false);
    let mut pinch_start_distance = use_signal(|| 0.0_f64);
    let mut pinch_start_transform = use_signal(|| ZoomTransform::IDENTITY);
    let mut pinch_midpoint = use_signal(|| (0.0_f64, 0.0_f64));

    let transform = *viewport.transform.read();
    let group_style = transform_style(&transform, *viewport.transition_ms.read());
    let stroke_width = transform.stroke_width();
    let svg_class = if *is_dragging.read() && *did_drag.read() {
        "site-map dragging"
    } else {
        "site-map"
    };

    let ctl = controller.read();
    let bindings = ctl.bindings().clone();
    let groups = ctl.render_tree().to_vec();
    let postholes_visible = ctl.postholes_visible();
    let focus = ctl.focus();
    let selection = ctl.selection().clone();
    let hover_text = ctl.hover_text().map(str::to_string);
    drop(ctl);

    rsx! {
        div { class: "site-map-container",
            div { class: "map-controls",
                FocusControls { focus, controller }
                div { class: "form-check form-check-inline",
                    input {
                        id: "ph-toggle",
                        class: "form-check-input",
                        r#type: "checkbox",
                        checked: postholes_visible,
                        onchange: move |_| {
                            controller.write().toggle_postholes();
                        },
                    }
                    label { class: "form-check-label", r#for: "ph-toggle", "Postholes" }
                }
            }

            svg {
                id: SVG_ID,
                class: "{svg_class}",
                view_box: "0 0 {width} {height}",
                preserve_aspect_ratio: "xMidYMid meet",

                // Feature clicks that were handled stop propagation before
                // reaching this handler.
                onclick: move |_| {
                    if *did_drag.peek() {
                        did_drag.set(false);
                        return;
                    }
                    controller.write().on_background_clicked(&mut viewport);
                },

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();
                    let current = viewport.current();
                    let exponent = coords::wheel_scale_exponent(evt.data().delta());
                    let new_k = coords::wheel_zoom(current.k, exponent, min_zoom, max_zoom);
                    if (new_k - current.k).abs() < 1e-9 {
                        return;
                    }
                    let client = evt.data().client_coordinates();
                    let Some(anchor) = coords::client_to_view_in(client.x, client.y, SVG_ID, width) else {
                        return;
                    };
                    viewport.jump(current.zoom_at(anchor, new_k));
                },

                onmousedown: move |evt: Event<MouseData>| {
                    // Only track drag for the left mouse button
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    let client = evt.client_coordinates();
                    is_dragging.set(true);
                    did_drag.set(false);
                    drag_start.set((client.x, client.y));
                    drag_start_transform.set(viewport.current());
                },

                onmousemove: move |evt: Event<MouseData>| {
                    if !*is_dragging.peek() {
                        return;
                    }
                    let client = evt.client_coordinates();
                    let (sx, sy) = *drag_start.peek();
                    let dx = client.x - sx;
                    let dy = client.y - sy;

                    if !*did_drag.peek() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                        did_drag.set(true);
                    }
                    if *did_drag.peek() {
                        let Some(rect) = coords::element_rect(SVG_ID) else { return };
                        let (vx, vy) = coords::client_delta_to_view(dx, dy, rect.width(), width);
                        let start = *drag_start_transform.peek();
                        viewport.jump(start.translate_by(vx, vy));
                    }
                },

                onmouseup: move |_| {
                    is_dragging.set(false);
                },

                onmouseleave: move |_| {
                    is_dragging.set(false);
                },

                // --- Touch event handlers ---
                // No preventDefault here: taps must still synthesize clicks.
                // Page scrolling over the map is disabled with `touch-action`.

                ontouchstart: move |evt: Event<TouchData>| {
                    let touches = evt.data().touches();
                    if touches.len() == 1 {
                        let t = &touches[0];
                        touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                        touch_did_pan.set(false);
                        touch_start_transform.set(viewport.current());
                    } else if touches.len() >= 2 {
                        let t0 = &touches[0];
                        let t1 = &touches[1];
                        let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                        let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                        is_pinching.set(true);
                        pinch_start_distance.set(coords::point_distance(p0, p1));
                        pinch_start_transform.set(viewport.current());
                        pinch_midpoint.set(((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0));
                        touch_start_pos.set(None);
                        touch_did_pan.set(true);
                    }
                },

                ontouchmove: move |evt: Event<TouchData>| {
                    let touches = evt.data().touches();

                    if *is_pinching.peek() && touches.len() >= 2 {
                        let t0 = &touches[0];
                        let t1 = &touches[1];
                        let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                        let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                        let start_d = *pinch_start_distance.peek();
                        if start_d < 1.0 {
                            return;
                        }
                        let start = *pinch_start_transform.peek();
                        let scale = coords::point_distance(p0, p1) / start_d;
                        let new_k = (start.k * scale).clamp(min_zoom, max_zoom);
                        let mid = *pinch_midpoint.peek();
                        let Some(anchor) = coords::client_to_view_in(mid.0, mid.1, SVG_ID, width) else {
                            return;
                        };
                        viewport.jump(start.zoom_at(anchor, new_k));
                    } else if touches.len() == 1 {
                        let t = &touches[0];
                        let cur = (t.client_coordinates().x, t.client_coordinates().y);
                        let Some(start) = *touch_start_pos.peek() else { return };
                        if !*touch_did_pan.peek() && coords::point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                            touch_did_pan.set(true);
                        }
                        if *touch_did_pan.peek() {
                            let Some(rect) = coords::element_rect(SVG_ID) else { return };
                            let (vx, vy) = coords::client_delta_to_view(
                                cur.0 - start.0,
                                cur.1 - start.1,
                                rect.width(),
                                width,
                            );
                            let origin = *touch_start_transform.peek();
                            viewport.jump(origin.translate_by(vx, vy));
                        }
                    }
                },

                ontouchend: move |evt: Event<TouchData>| {
                    let remaining = evt.data().touches().len();
                    if remaining == 0 {
                        is_pinching.set(false);
                        touch_start_pos.set(None);
                    }
                },

                ontouchcancel: move |_| {
                    touch_start_pos.set(None);
                    touch_did_pan.set(false);
                    is_pinching.set(false);
                },

                rect {
                    class: "map-background",
                    width: "{width}",
                    height: "{height}",
                    fill: "none",
                    pointer_events: "all",
                }

                g {
                    class: "map-zoom",
                    style: "{group_style}",
                    stroke_width: "{stroke_width}",
                    for group in groups {
                        LayerGroup {
                            key: "{group.layer}",
                            group: group.clone(),
                            binding: bindings.get(group.layer),
                            controller,
                            viewport,
                            suppress_click: did_drag,
                            tooltip_pos,
                        }
                    }
                }
            }

            ContextPanel { selection }
            FeatureTooltip { text: hover_text, position: tooltip_pos }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_style_identity() {
        assert_eq!(
            transform_style(&ZoomTransform::IDENTITY, None),
            "transform: translate(0px, 0px) scale(1); transform-origin: 0 0;"
        );
    }

    #[test]
    fn test_transform_style_while_animating() {
        let t = ZoomTransform {
            k: 8.0,
            x: 52.0,
            y: 92.0,
        };
        let style = transform_style(&t, Some(750));
        assert!(style.starts_with("transform: translate(52px, 92px) scale(8);"));
        assert!(style.ends_with("transition: transform 750ms ease-in-out;"));
    }
}
