use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, SiteError};

pub const DEFAULT_DATASET_URL: &str = "assets/json/excavations@1_minify.json";
pub const DEFAULT_NEUTRAL_TEXT: &str = "Click a feature on the map";

/// Behaviours a page can opt into through its `#eot-config` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageModule {
    Map,
    Modals,
    Popovers,
    PageNav,
    Gallery,
}

impl std::fmt::Display for PageModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageModule::Map => write!(f, "map"),
            PageModule::Modals => write!(f, "modals"),
            PageModule::Popovers => write!(f, "popovers"),
            PageModule::PageNav => write!(f, "page-nav"),
            PageModule::Gallery => write!(f, "gallery"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub dataset_url: String,
    /// Width of the SVG view box in site units.
    pub width: f64,
    pub height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub transition_ms: u32,
    pub point_radius: f64,
    pub neutral_text: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            width: 520.0,
            height: 600.0,
            min_zoom: 1.0,
            max_zoom: 8.0,
            transition_ms: 750,
            point_radius: 4.5,
            neutral_text: DEFAULT_NEUTRAL_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub modules: Vec<PageModule>,
    /// Page number → path relative to the site root, filled in at generation time.
    pub page_nums: HashMap<String, String>,
    pub map: MapConfig,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(raw)
            .map_err(|e| SiteError::precondition(format!("invalid site config: {}", e)))?;
        config.map.validate()?;
        Ok(config)
    }

    pub fn enables(&self, module: PageModule) -> bool {
        self.modules.contains(&module)
    }
}

impl MapConfig {
    fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SiteError::precondition("map width and height must be positive"));
        }
        if self.min_zoom <= 0.0 || self.max_zoom < self.min_zoom {
            return Err(SiteError::precondition(format!(
                "invalid zoom extent [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert!(config.modules.is_empty());
        assert!(config.page_nums.is_empty());
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.map.max_zoom, 8.0);
        assert_eq!(config.map.transition_ms, 750);
    }

    #[test]
    fn test_modules_parse_kebab_case() {
        let config =
            SiteConfig::from_json(r#"{"modules":["map","page-nav","gallery"]}"#).unwrap();
        assert!(config.enables(PageModule::Map));
        assert!(config.enables(PageModule::PageNav));
        assert!(config.enables(PageModule::Gallery));
        assert!(!config.enables(PageModule::Modals));
    }

    #[test]
    fn test_partial_map_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{"map":{"datasetUrl":"/data/site.json","maxZoom":12}}"#,
        )
        .unwrap();
        assert_eq!(config.map.dataset_url, "/data/site.json");
        assert_eq!(config.map.max_zoom, 12.0);
        assert_eq!(config.map.width, 520.0);
        assert_eq!(config.map.neutral_text, DEFAULT_NEUTRAL_TEXT);
    }

    #[test]
    fn test_page_nums_parse() {
        let config =
            SiteConfig::from_json(r#"{"pageNums":{"12":"part1/12_intro.html"}}"#).unwrap();
        assert_eq!(config.page_nums["12"], "part1/12_intro.html");
    }

    #[test]
    fn test_malformed_json_is_precondition_violation() {
        let err = SiteConfig::from_json("{modules:").unwrap_err();
        assert!(matches!(err, SiteError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_unknown_module_rejected() {
        assert!(SiteConfig::from_json(r#"{"modules":["charts"]}"#).is_err());
    }

    #[test]
    fn test_inverted_zoom_extent_rejected() {
        let err = SiteConfig::from_json(r#"{"map":{"minZoom":4,"maxZoom":2}}"#).unwrap_err();
        assert!(err.to_string().contains("zoom extent"));
    }
}
