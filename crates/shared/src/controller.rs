//! Focus/visibility state machine of the site map.
//!
//! The controller owns everything the map mutates in response to input: the
//! focus mode, the layer bindings derived from it, the render tree (which
//! groups exist and in what z-order), the selection shown next to the map and
//! the hover tooltip text. The DOM side renders from this state and forwards
//! input events; animation is delegated through [`Viewport`].

use std::sync::Arc;

use crate::config::MapConfig;
use crate::geometry::ZoomTransform;
use crate::models::{Excavation, Highlight, LayerName, MetadataTable};
use crate::tooltip::PointerCapability;

/// Which layers accept clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusMode {
    #[default]
    None,
    Grid,
    Features,
    Structures,
}

impl FocusMode {
    pub const ALL: [FocusMode; 4] = [
        FocusMode::None,
        FocusMode::Features,
        FocusMode::Structures,
        FocusMode::Grid,
    ];

    /// Layers made clickable by this mode, bottom to top once raised.
    /// Interior outlines sit inside the external ones and must stay above
    /// them to receive pointer events.
    pub fn layers(&self) -> &'static [LayerName] {
        match self {
            FocusMode::None => &[],
            FocusMode::Grid => &[LayerName::Grid],
            FocusMode::Features => &[LayerName::Features],
            FocusMode::Structures => &[LayerName::StructuresExternal, LayerName::StructuresInternal],
        }
    }

    /// Id of the control element that activates this mode.
    pub fn control_id(&self) -> &'static str {
        match self {
            FocusMode::None => "focus-none",
            FocusMode::Grid => "focus-grid",
            FocusMode::Features => "focus-features",
            FocusMode::Structures => "focus-structures",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FocusMode::None => "None",
            FocusMode::Grid => "Grid",
            FocusMode::Features => "Features",
            FocusMode::Structures => "Structures",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerBinding {
    pub click: bool,
    pub hover: bool,
}

/// Handler state of every layer, one entry per [`LayerName::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerBindings([LayerBinding; 6]);

impl LayerBindings {
    pub fn get(&self, layer: LayerName) -> LayerBinding {
        self.0[layer_index(layer)]
    }

    pub fn clickable(&self) -> Vec<LayerName> {
        LayerName::ALL
            .into_iter()
            .filter(|l| self.get(*l).click)
            .collect()
    }
}

fn layer_index(layer: LayerName) -> usize {
    LayerName::ALL
        .iter()
        .position(|l| *l == layer)
        .unwrap_or_default()
}

/// Bindings for `mode`, derived from nothing but the mode and the pointer.
/// Hover follows click so only clickable features show a tooltip.
pub fn bindings_for(mode: FocusMode, pointer: PointerCapability) -> LayerBindings {
    let mut bindings = [LayerBinding::default(); 6];
    for layer in mode.layers() {
        bindings[layer_index(*layer)] = LayerBinding {
            click: true,
            hover: pointer.supports_hover(),
        };
    }
    LayerBindings(bindings)
}

/// Bottom-to-top drawing order for `mode`: postholes always lowest, then the
/// inactive layers in base order, then the focused layers on top in the
/// order [`FocusMode::layers`] lists them.
pub fn raise_order(mode: FocusMode) -> Vec<LayerName> {
    let focused = mode.layers();
    let mut order = vec![LayerName::Postholes];
    order.extend(
        LayerName::ALL
            .into_iter()
            .filter(|l| *l != LayerName::Postholes && !focused.contains(l)),
    );
    order.extend(focused.iter().copied());
    order
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub id: String,
    pub path: String,
}

/// One `<g>` of the map and its bound features.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGroup {
    pub layer: LayerName,
    pub features: Vec<RenderedFeature>,
}

/// Text and link shown for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub href: String,
    pub highlight: Highlight,
}

impl Selection {
    pub fn neutral(text: &str) -> Self {
        Selection {
            text: text.to_string(),
            href: "#".to_string(),
            highlight: Highlight::Default,
        }
    }
}

/// Whether a feature click was consumed or should reach the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    Handled,
    PassThrough,
}

/// Animation surface the controller drives. Transitions are fire-and-forget;
/// a new one supersedes whatever is in flight.
pub trait Viewport {
    fn animate_transform(&mut self, target: ZoomTransform, duration_ms: u32);
}

pub struct MapController {
    dataset: Arc<Excavation>,
    metadata: Arc<MetadataTable>,
    config: MapConfig,
    pointer: PointerCapability,
    focus: FocusMode,
    bindings: LayerBindings,
    postholes_visible: bool,
    render_tree: Vec<RenderedGroup>,
    selection: Selection,
    hover_text: Option<String>,
}

impl MapController {
    pub fn new(
        dataset: Arc<Excavation>,
        metadata: Arc<MetadataTable>,
        config: MapConfig,
        pointer: PointerCapability,
    ) -> Self {
        let focus = FocusMode::default();
        let render_tree = raise_order(focus)
            .into_iter()
            .map(|layer| build_group(&dataset, layer, config.point_radius))
            .collect();
        let selection = Selection::neutral(&config.neutral_text);
        MapController {
            bindings: bindings_for(focus, pointer),
            dataset,
            metadata,
            config,
            pointer,
            focus,
            postholes_visible: true,
            render_tree,
            selection,
            hover_text: None,
        }
    }

    pub fn focus(&self) -> FocusMode {
        self.focus
    }

    pub fn bindings(&self) -> &LayerBindings {
        &self.bindings
    }

    pub fn postholes_visible(&self) -> bool {
        self.postholes_visible
    }

    pub fn render_tree(&self) -> &[RenderedGroup] {
        &self.render_tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Name of the hovered feature while its tooltip is shown.
    pub fn hover_text(&self) -> Option<&str> {
        self.hover_text.as_deref()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Rebind click/hover handlers and z-order for `mode`.
    pub fn set_focus(&mut self, mode: FocusMode) {
        tracing::debug!(from = ?self.focus, to = ?mode, "Map focus changed");
        self.focus = mode;
        self.bindings = bindings_for(mode, self.pointer);
        let order = raise_order(mode);
        self.render_tree
            .sort_by_key(|g| order.iter().position(|l| *l == g.layer));
        self.hover_text = None;
    }

    /// Remove or rebuild the posthole group; returns the new visibility.
    pub fn toggle_postholes(&mut self) -> bool {
        if self.postholes_visible {
            self.render_tree.retain(|g| g.layer != LayerName::Postholes);
        } else {
            let group = build_group(&self.dataset, LayerName::Postholes, self.config.point_radius);
            self.render_tree.insert(0, group);
        }
        self.postholes_visible = !self.postholes_visible;
        tracing::debug!(visible = self.postholes_visible, "Postholes toggled");
        self.postholes_visible
    }

    /// Frame the clicked feature and show its metadata.
    ///
    /// Clicks on a layer without a click binding pass through to the
    /// background, as an element with no handler would.
    pub fn on_feature_clicked(
        &mut self,
        layer: LayerName,
        feature_id: &str,
        viewport: &mut dyn Viewport,
    ) -> ClickDisposition {
        if !self.bindings.get(layer).click {
            return ClickDisposition::PassThrough;
        }

        // Ids are only unique within a layer.
        let bounds = self
            .dataset
            .layer(layer)
            .iter()
            .find(|f| f.id == feature_id)
            .and_then(|f| f.shape.bounds());
        if let Some(bounds) = bounds {
            let target = ZoomTransform::frame(
                &bounds,
                self.config.width,
                self.config.height,
                self.config.max_zoom,
            );
            viewport.animate_transform(target, self.config.transition_ms);
        }

        match self.metadata.require(feature_id) {
            Ok(meta) => {
                self.selection = Selection {
                    text: meta.name.clone(),
                    href: meta.href.clone(),
                    highlight: meta.highlight(),
                };
            }
            Err(e) => tracing::warn!(error = %e, "Clicked feature has no metadata"),
        }
        ClickDisposition::Handled
    }

    pub fn on_background_clicked(&mut self, viewport: &mut dyn Viewport) {
        viewport.animate_transform(ZoomTransform::IDENTITY, self.config.transition_ms);
        self.selection = Selection::neutral(&self.config.neutral_text);
    }

    /// Show the tooltip for a hovered feature. Returns false when the layer
    /// has no hover binding or the feature has no metadata. The tooltip's
    /// position follows the cursor outside the controller.
    pub fn on_feature_hovered(&mut self, layer: LayerName, feature_id: &str) -> bool {
        if !self.bindings.get(layer).hover {
            return false;
        }
        let Some(meta) = self.metadata.get(feature_id) else {
            return false;
        };
        self.hover_text = Some(meta.name.clone());
        true
    }

    pub fn on_hover_end(&mut self) {
        self.hover_text = None;
    }
}

fn build_group(dataset: &Excavation, layer: LayerName, point_radius: f64) -> RenderedGroup {
    let features = dataset
        .layer(layer)
        .iter()
        .map(|f| RenderedFeature {
            id: f.id.clone(),
            path: f.shape.path_data(point_radius),
        })
        .collect();
    RenderedGroup { layer, features }
}
