mod api;
mod behaviors;
mod components;
mod coords;
mod dom;
mod pages;

use std::sync::Arc;

use dioxus::prelude::*;
use eot_shared::config::{PageModule, SiteConfig};
use eot_shared::models::MetadataTable;
use eot_shared::Result;

const CONFIG_SCRIPT_ID: &str = "eot-config";
const METADATA_SCRIPT_ID: &str = "map-metadata";
const MAP_MOUNT_ID: &str = "map";

const CSS: Asset = asset!("/assets/map.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        pages::site_map::SiteMap {}
    }
}

/// Everything the map needs from the host page before it can mount.
fn map_preconditions() -> Result<Arc<MetadataTable>> {
    dom::require_element(MAP_MOUNT_ID)?;
    let raw = dom::json_script(METADATA_SCRIPT_ID)?;
    let metadata = MetadataTable::from_json(&raw)?;
    tracing::info!(entries = metadata.len(), "Loaded feature metadata");
    Ok(Arc::new(metadata))
}

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }

    let config = match dom::json_script(CONFIG_SCRIPT_ID).and_then(|raw| SiteConfig::from_json(&raw)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "No usable site configuration; nothing installed");
            return;
        }
    };

    behaviors::install(&config);

    if !config.enables(PageModule::Map) {
        return;
    }
    let metadata = match map_preconditions() {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::error!(module = %PageModule::Map, error = %e, "Module not installed");
            return;
        }
    };

    tracing::info!(module = %PageModule::Map, "Installing module");
    LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(MAP_MOUNT_ID))
        .with_context(config.map)
        .with_context(metadata)
        .launch(App);
}
