pub mod context_panel;
pub mod feature_tooltip;
pub mod focus_controls;
pub mod layer_group;
pub mod map_view;
