use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Result, TrackcamError};

/// A GeoJSON position: `[longitude, latitude]`, optionally followed by an
/// elevation and other values, which are carried along untouched.
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Parses a Feature, a FeatureCollection or a bare geometry. A bare
    /// geometry is wrapped in a Feature without properties.
    pub fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str::<GeoJson>(text) {
            Ok(geojson) => Ok(geojson),
            Err(feature_err) => match serde_json::from_str::<GeoJsonGeometry>(text) {
                Ok(geometry) => Ok(GeoJson::Feature(GeoJsonFeature {
                    id: None,
                    geometry: Some(geometry),
                    properties: None,
                })),
                Err(_) => Err(TrackcamError::Serialization(feature_err)),
            },
        }
    }

    /// A Feature holding a single LineString
    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        GeoJson::Feature(GeoJsonFeature {
            id: None,
            geometry: Some(GeoJsonGeometry::LineString {
                coordinates: coordinates.into_iter().map(|c| c.to_vec()).collect(),
            }),
            properties: None,
        })
    }

    /// Gets all features
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
        }
    }

    /// Coordinates of the first LineString found, in document order
    pub fn first_line_string(&self) -> Option<&[Position]> {
        self.features()
            .into_iter()
            .filter_map(|f| f.geometry.as_ref())
            .find_map(GeoJsonGeometry::first_line_string)
    }
}

impl GeoJsonGeometry {
    /// The first LineString inside this geometry, looking into collections
    pub fn first_line_string(&self) -> Option<&[Position]> {
        match self {
            GeoJsonGeometry::LineString { coordinates } => Some(coordinates.as_slice()),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                geometries.iter().find_map(Self::first_line_string)
            }
            _ => None,
        }
    }
}
