use std::sync::Arc;

use dioxus::prelude::*;
use eot_shared::config::MapConfig;
use eot_shared::models::MetadataTable;

use crate::api;
use crate::components::map_view::MapView;

#[component]
pub fn SiteMap() -> Element {
    let config = use_context::<MapConfig>();
    let metadata = use_context::<Arc<MetadataTable>>();

    // One-shot fetch; the dataset never changes for the page lifetime.
    let dataset_url = config.dataset_url.clone();
    let dataset = use_resource(move || {
        let url = dataset_url.clone();
        async move {
            let result = api::fetch_excavation(&url).await;
            if let Err(e) = &result {
                tracing::error!(url = %url, error = %e, "Site map dataset unavailable");
            }
            result
        }
    });

    let view = match &*dataset.read() {
        None => rsx! {
            div { class: "map-status", "Loading site map…" }
        },
        Some(Err(e)) => rsx! {
            div { class: "map-status map-error", "Site map unavailable: {e}" }
        },
        Some(Ok(data)) => rsx! {
            MapView {
                dataset: data.clone(),
                metadata: metadata.clone(),
                config: config.clone(),
            }
        },
    };
    view
}
