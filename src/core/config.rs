//! Configuration for the camera comparison
//!
//! Everything the flyover needs is carried by an explicit [`ComparisonConfig`]
//! handed to [`Comparison::new`](crate::comparison::Comparison::new): map style,
//! animation timing, smoothing strength and the scene dressing. Presets cover
//! the usual cases; a JSON file can override any field.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::{
    ALTITUDE, ANIMATION_DURATION_MS, BEARING_RATE, DEFAULT_ZOOM, PITCH, SMOOTH_FACTOR,
};
use crate::layers::{Color, Fog};
use crate::{Result, TrackcamError};

/// Environment variable consulted when no access token is configured
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonPreset {
    /// One-minute flyover, as shown in the viewer
    Standard,
    /// Ten-second flyover for headless runs and smoke tests
    Quick,
    Custom(ComparisonConfig),
}

impl ComparisonPreset {
    pub fn resolve(&self) -> ComparisonConfig {
        match self {
            Self::Standard => ComparisonConfig::default(),
            Self::Quick => ComparisonConfig {
                animation: AnimationConfig {
                    duration_ms: 10_000.0,
                    ..AnimationConfig::default()
                },
                ..ComparisonConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ComparisonPreset {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub access_token: Option<String>,
    /// Track location: a file path or an http(s) URL
    pub track: String,
    pub map: MapStyleConfig,
    pub animation: AnimationConfig,
    pub smoothing: SmoothingConfig,
    pub scene: SceneStyleConfig,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            track: "./data/stage-10.geojson".to_string(),
            map: MapStyleConfig::default(),
            animation: AnimationConfig::default(),
            smoothing: SmoothingConfig::default(),
            scene: SceneStyleConfig::default(),
        }
    }
}

impl ComparisonConfig {
    /// Parses a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the animation cannot run with
    pub fn validate(&self) -> Result<()> {
        let duration = self.animation.duration_ms;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrackcamError::InvalidConfig(format!(
                "animation.duration_ms must be positive, got {}",
                duration
            )));
        }
        let factor = self.smoothing.factor;
        if !(0.0..1.0).contains(&factor) {
            return Err(TrackcamError::InvalidConfig(format!(
                "smoothing.factor must be in [0, 1), got {}",
                factor
            )));
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Fills a missing access token from the environment
    pub fn with_env_token(mut self) -> Self {
        if self.access_token.as_deref().map_or(true, str::is_empty) {
            if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
                self.access_token = Some(token);
            }
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Globe,
    Mercator,
}

/// Initial view shared by both maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyleConfig {
    pub style: String,
    pub projection: Projection,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    /// Height in pixels used to derive the initial camera distance from `zoom`
    pub viewport_height: f64,
}

impl Default for MapStyleConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/dark-v10".to_string(),
            projection: Projection::Globe,
            zoom: DEFAULT_ZOOM,
            pitch: PITCH,
            bearing: 0.0,
            viewport_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: f64,
    pub start_bearing: f64,
    pub altitude: f64,
    pub pitch: f64,
    /// Degrees of rotation per unit of phase
    pub bearing_rate: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: ANIMATION_DURATION_MS,
            start_bearing: 0.0,
            altitude: ALTITUDE,
            pitch: PITCH,
            bearing_rate: BEARING_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Weight of the previous camera position, in `[0, 1)`.
    /// [`ComparisonConfig::validate`] rejects anything else.
    pub factor: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            factor: SMOOTH_FACTOR,
        }
    }
}

/// Fog, sky, terrain and track styling applied on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyleConfig {
    pub fog: Fog,
    pub sky_atmosphere_color: Color,
    pub dem_url: String,
    pub dem_tile_size: u32,
    pub dem_max_zoom: u8,
    pub terrain_exaggeration: f64,
    /// Color of the revealed part of the track
    pub track_color: Color,
    pub line_width: f64,
    pub line_opacity: f64,
}

impl Default for SceneStyleConfig {
    fn default() -> Self {
        Self {
            fog: Fog::default(),
            sky_atmosphere_color: Color::rgba(85, 151, 210, 0.5),
            dem_url: "mapbox://mapbox.terrain-rgb".to_string(),
            dem_tile_size: 512,
            dem_max_zoom: 14,
            terrain_exaggeration: 1.5,
            track_color: Color::YELLOW,
            line_width: 9.0,
            line_opacity: 0.8,
        }
    }
}
