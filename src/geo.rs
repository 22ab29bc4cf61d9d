//! Geography dataset: GeoJSON features consumed read-only by the scene builder

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// GeoJSON position: lon, lat, then optional extra ordinates we ignore
pub type Position = Vec<f64>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    /// Points, collections and anything else: kept, but draws nothing
    #[serde(other)]
    Unsupported,
}

/// A ring or line in geographic coordinates, and whether it closes
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPath<'a> {
    pub positions: &'a [Position],
    pub closed: bool,
}

impl Geometry {
    /// Flatten into the paths that make up the outline
    pub fn paths(&self) -> Vec<GeoPath<'_>> {
        match self {
            Geometry::Polygon { coordinates } => {
                coordinates.iter().map(|r| GeoPath::new(r, true)).collect()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .map(|r| GeoPath::new(r, true))
                .collect(),
            Geometry::LineString { coordinates } => vec![GeoPath::new(coordinates, false)],
            Geometry::MultiLineString { coordinates } => {
                coordinates.iter().map(|r| GeoPath::new(r, false)).collect()
            }
            Geometry::Unsupported => Vec::new(),
        }
    }
}

impl<'a> GeoPath<'a> {
    fn new(positions: &'a [Position], closed: bool) -> Self {
        Self { positions, closed }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeographyFeature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GeographyFeature {
    pub fn polygon(name: &str, ring: Vec<Position>) -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert("name".into(), serde_json::Value::String(name.into()));
        Self {
            geometry: Some(Geometry::Polygon { coordinates: vec![ring] }),
            properties: Some(properties),
        }
    }

    /// `properties.name`, if the dataset provides one
    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.get("name")?.as_str()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<GeographyFeature>,
}

/// Parse a GeoJSON FeatureCollection
pub fn parse_features(json: &str, origin: &str) -> Result<Vec<GeographyFeature>> {
    let collection: FeatureCollection = serde_json::from_str(json).map_err(|source| Error::Json {
        origin: origin.to_string(),
        source,
    })?;
    Ok(collection.features)
}

/// Load a FeatureCollection from disk
pub fn load_features(path: &Path) -> Result<Vec<GeographyFeature>> {
    let json = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let features = parse_features(&json, &path.display().to_string())?;
    tracing::info!(path = %path.display(), count = features.len(), "loaded geography");
    Ok(features)
}
