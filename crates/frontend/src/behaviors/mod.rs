//! Page behaviours installed outside the map: modals, popovers, page-number
//! navigation and the lightbox gallery. Each is opted into by the page's
//! configuration and fails independently of the others.

pub mod artifact_popovers;
pub mod gallery;
pub mod modals;
pub mod page_nav;
pub mod popover;

use eot_shared::config::{PageModule, SiteConfig};
use eot_shared::pages::PageTable;

pub fn install(config: &SiteConfig) {
    for module in &config.modules {
        let result = match module {
            // Mounted by Dioxus in main.
            PageModule::Map => continue,
            PageModule::Modals => modals::install(),
            PageModule::Popovers => artifact_popovers::install(),
            PageModule::PageNav => page_nav::install(PageTable::new(config.page_nums.clone())),
            PageModule::Gallery => gallery::install(),
        };
        match result {
            Ok(()) => tracing::info!(module = %module, "Installed module"),
            Err(e) => tracing::error!(module = %module, error = %e, "Module not installed"),
        }
    }
}
