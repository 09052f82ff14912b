//! GeoJSON boundary file loading.
//!
//! The pipeline does not render maps; it only needs the boundary file's
//! region names so a summary table can be checked for labels the map would
//! silently drop.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

/// Extracts the value of `name_property` from every feature of a GeoJSON
/// FeatureCollection. Features without the property are skipped with a
/// warning.
///
/// # Errors
///
/// Fails if the file cannot be opened or is not a FeatureCollection.
pub fn load_region_names(path: &Path, name_property: &str) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let collection: FeatureCollection = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a GeoJSON FeatureCollection", path.display()))?;

    let mut names = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        match feature.properties.get(name_property).and_then(Value::as_str) {
            Some(name) => names.push(name.to_string()),
            None => warn!(
                property = name_property,
                "GeoJSON feature without a name property, skipping"
            ),
        }
    }
    Ok(names)
}

/// Region labels present in a summary but absent from the boundary file.
///
/// These are the rows a choropleth would drop without a trace; callers log
/// them so alias tables can be extended.
pub fn unmatched_regions<'a>(regions: &'a [String], boundary_names: &[String]) -> Vec<&'a str> {
    regions
        .iter()
        .filter(|r| !boundary_names.iter().any(|n| n == *r))
        .map(String::as_str)
        .collect()
}
