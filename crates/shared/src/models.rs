use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, SiteError};
use crate::geometry::Shape;

/// The named layers of the excavation dataset, in base drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerName {
    Grid,
    Postholes,
    Palisade,
    StructuresInternal,
    StructuresExternal,
    Features,
}

impl LayerName {
    pub const ALL: [LayerName; 6] = [
        LayerName::Grid,
        LayerName::Postholes,
        LayerName::Palisade,
        LayerName::StructuresInternal,
        LayerName::StructuresExternal,
        LayerName::Features,
    ];

    /// Key of the layer in the dataset JSON.
    pub fn key(&self) -> &'static str {
        match self {
            LayerName::Grid => "grid",
            LayerName::Postholes => "postholes",
            LayerName::Palisade => "palisade",
            LayerName::StructuresInternal => "structures_internal",
            LayerName::StructuresExternal => "structures_external",
            LayerName::Features => "features",
        }
    }
}

impl std::fmt::Display for LayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteFeature {
    pub id: String,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayer {
    pub name: LayerName,
    pub features: Vec<SiteFeature>,
}

#[derive(Deserialize)]
struct RawExcavation {
    grid: geojson::FeatureCollection,
    postholes: geojson::FeatureCollection,
    palisade: geojson::FeatureCollection,
    structures_internal: geojson::FeatureCollection,
    structures_external: geojson::FeatureCollection,
    features: geojson::FeatureCollection,
}

/// The immutable excavation dataset: every layer, loaded once per page.
#[derive(Debug, Clone, PartialEq)]
pub struct Excavation {
    layers: Vec<SiteLayer>,
}

impl Excavation {
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawExcavation = serde_json::from_str(raw)
            .map_err(|e| SiteError::precondition(format!("invalid excavation dataset: {}", e)))?;
        let collections = [
            (LayerName::Grid, raw.grid),
            (LayerName::Postholes, raw.postholes),
            (LayerName::Palisade, raw.palisade),
            (LayerName::StructuresInternal, raw.structures_internal),
            (LayerName::StructuresExternal, raw.structures_external),
            (LayerName::Features, raw.features),
        ];
        let layers = collections
            .into_iter()
            .map(|(name, fc)| convert_layer(name, fc))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            features = layers.iter().map(|l| l.features.len()).sum::<usize>(),
            "Loaded excavation dataset"
        );
        Ok(Excavation { layers })
    }

    pub fn from_layers(layers: Vec<SiteLayer>) -> Self {
        Excavation { layers }
    }

    pub fn layer(&self, name: LayerName) -> &[SiteFeature] {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.features.as_slice())
            .unwrap_or(&[])
    }
}

fn convert_layer(name: LayerName, fc: geojson::FeatureCollection) -> Result<SiteLayer> {
    let features = fc
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| convert_feature(name, i, f))
        .collect::<Result<Vec<_>>>()?;
    Ok(SiteLayer { name, features })
}

fn convert_feature(layer: LayerName, index: usize, feature: &geojson::Feature) -> Result<SiteFeature> {
    let id = feature_id(feature).ok_or_else(|| {
        SiteError::precondition(format!("{} feature #{} has no identifier", layer, index))
    })?;
    let shape = match &feature.geometry {
        Some(g) => Shape::from_geometry(g)?,
        None => Shape::default(),
    };
    Ok(SiteFeature { id, shape })
}

/// GeoJSON `id`, falling back to the `id` then `name` properties.
fn feature_id(feature: &geojson::Feature) -> Option<String> {
    if let Some(id) = &feature.id {
        return Some(match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        });
    }
    ["id", "name"]
        .iter()
        .filter_map(|key| feature.property(key))
        .find_map(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Explicit category tag a metadata record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Grid,
    Feature,
    Burial,
    Structure,
}

/// Display colour of the selection text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Structure,
    Grid,
    Alert,
    Default,
}

impl Highlight {
    /// Bootstrap text colour class, matching the layer stroke colours.
    pub fn css_class(&self) -> &'static str {
        match self {
            Highlight::Structure => "text-warning",
            Highlight::Grid => "text-primary",
            Highlight::Alert => "text-danger",
            Highlight::Default => "text-dark",
        }
    }

    /// Keyword classification of a display name. Case-insensitive; checked in
    /// the order structure, sq, feature/burial.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("structure") {
            Highlight::Structure
        } else if name.contains("sq") {
            Highlight::Grid
        } else if name.contains("feature") || name.contains("burial") {
            Highlight::Alert
        } else {
            Highlight::Default
        }
    }
}

impl From<FeatureCategory> for Highlight {
    fn from(category: FeatureCategory) -> Self {
        match category {
            FeatureCategory::Grid => Highlight::Grid,
            FeatureCategory::Feature | FeatureCategory::Burial => Highlight::Alert,
            FeatureCategory::Structure => Highlight::Structure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureMeta {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub category: Option<FeatureCategory>,
}

impl FeatureMeta {
    pub fn highlight(&self) -> Highlight {
        match self.category {
            Some(category) => category.into(),
            None => Highlight::from_name(&self.name),
        }
    }
}

/// Feature id → display metadata, supplied by the host page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable(HashMap<String, FeatureMeta>);

impl MetadataTable {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| SiteError::precondition(format!("invalid feature metadata: {}", e)))
    }

    pub fn get(&self, id: &str) -> Option<&FeatureMeta> {
        self.0.get(id)
    }

    /// Lookup whose absence is a data-consistency failure between the dataset
    /// and the metadata generated alongside it.
    pub fn require(&self, id: &str) -> Result<&FeatureMeta> {
        self.0
            .get(id)
            .ok_or_else(|| SiteError::precondition(format!("no metadata for feature {}", id)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FeatureMeta)> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = (String, FeatureMeta)>>(iter: I) -> Self {
        MetadataTable(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const EMPTY_FC: &str = r#"{"type":"FeatureCollection","features":[]}"#;

    fn dataset_json(grid: &str, features: &str) -> String {
        format!(
            r#"{{"grid":{grid},"postholes":{e},"palisade":{e},"structures_internal":{e},"structures_external":{e},"features":{features}}}"#,
            e = EMPTY_FC
        )
    }

    #[test]
    fn test_dataset_parses_ids_from_all_sources() {
        let grid = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":"sq_A1","properties":{},"geometry":{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
            {"type":"Feature","properties":{"id":"sq_A2"},"geometry":{"type":"Polygon","coordinates":[[[10,0],[20,0],[20,10],[10,10],[10,0]]]}}
        ]}"#;
        let features = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":7,"properties":null,"geometry":{"type":"Point","coordinates":[5,5]}},
            {"type":"Feature","properties":{"name":"Fea. 9"},"geometry":null}
        ]}"#;
        let ex = Excavation::from_json(&dataset_json(grid, features)).unwrap();
        let grid_ids: Vec<&str> = ex.layer(LayerName::Grid).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(grid_ids, vec!["sq_A1", "sq_A2"]);
        let feat_ids: Vec<&str> = ex
            .layer(LayerName::Features)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(feat_ids, vec!["7", "Fea. 9"]);
        assert!(ex.layer(LayerName::Features)[1].shape.bounds().is_none());
    }

    #[test]
    fn test_dataset_missing_layer_rejected() {
        let raw = format!(r#"{{"grid":{}}}"#, EMPTY_FC);
        let err = Excavation::from_json(&raw).unwrap_err();
        assert!(matches!(err, SiteError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_dataset_feature_without_id_rejected() {
        let grid = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,1]}}
        ]}"#;
        let err = Excavation::from_json(&dataset_json(grid, EMPTY_FC)).unwrap_err();
        assert!(err.to_string().contains("grid feature #0"));
    }

    #[test]
    fn test_layer_lookup_keeps_ids_per_layer() {
        let grid = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":12,"properties":{},"geometry":{"type":"Point","coordinates":[1,1]}}
        ]}"#;
        let features = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":"12","properties":{},"geometry":{"type":"Point","coordinates":[3,4]}}
        ]}"#;
        let ex = Excavation::from_json(&dataset_json(grid, features)).unwrap();
        assert_eq!(ex.layer(LayerName::Grid)[0].id, "12");
        assert_eq!(ex.layer(LayerName::Features)[0].id, "12");
        assert_eq!(
            ex.layer(LayerName::Features)[0].shape.points,
            vec![Point::new(3.0, 4.0)]
        );
        assert!(ex.layer(LayerName::Palisade).is_empty());
    }

    #[test]
    fn test_highlight_keywords() {
        assert_eq!(Highlight::from_name("Structure 4"), Highlight::Structure);
        assert_eq!(Highlight::from_name("Square A1"), Highlight::Grid);
        assert_eq!(Highlight::from_name("Feature 12"), Highlight::Alert);
        assert_eq!(Highlight::from_name("Burial 3"), Highlight::Alert);
        assert_eq!(Highlight::from_name("Palisade trench"), Highlight::Default);
    }

    #[test]
    fn test_highlight_keyword_order() {
        // "structure" is checked before "sq", "sq" before "feature".
        assert_eq!(Highlight::from_name("Structure in Sq B2"), Highlight::Structure);
        assert_eq!(Highlight::from_name("Feature in Sq B2"), Highlight::Grid);
    }

    #[test]
    fn test_explicit_category_overrides_keywords() {
        let meta = FeatureMeta {
            name: "Structure fill in Sq 3".to_string(),
            href: "/f".to_string(),
            category: Some(FeatureCategory::Burial),
        };
        assert_eq!(meta.highlight(), Highlight::Alert);
    }

    #[test]
    fn test_metadata_table_parses() {
        let table = MetadataTable::from_json(
            r#"{"sq_A1":{"name":"Square A1","href":"/a1"},"s1":{"name":"Structure 1","href":"/s1","category":"structure"}}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sq_A1").unwrap().href, "/a1");
        assert_eq!(
            table.get("s1").unwrap().category,
            Some(FeatureCategory::Structure)
        );
    }

    #[test]
    fn test_metadata_require_missing() {
        let table = MetadataTable::default();
        let err = table.require("x").unwrap_err();
        assert!(matches!(err, SiteError::PreconditionViolation { .. }));
    }
}
