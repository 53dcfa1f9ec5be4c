//! # trackcam
//!
//! Side-by-side 3D flyovers of a GPS track.
//!
//! Two maps share one track, one style and one starting view. Each map runs
//! its own path animator that moves a free camera along the track while
//! revealing the line behind it. The left map recomputes the camera anchor
//! every frame; the right map blends it with the previous anchor, which makes
//! the difference between a raw and a smoothed camera path easy to see.

pub mod animation;
pub mod comparison;
pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
#[cfg(feature = "render")]
pub mod rendering;
pub mod runtime;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    camera::FreeCameraOptions,
    config::{ComparisonConfig, ComparisonPreset},
    geo::{LngLat, MercatorCoordinate},
    map::{MapEvent, MapOptions, SceneMap},
};

pub use animation::{
    animator::{AnimationHandle, AnimationReport, AnimatorOptions, PathAnimator},
    camera_path::{compute_camera_position, CameraPosition, Smoothing},
};

pub use comparison::{Comparison, Pane, PaneStatus, Side};

pub use data::{geojson::GeoJson, loader::TrackLoader, track::Track};

pub use traits::{FrameScheduler, MapEngine};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TrackcamError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TrackcamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = TrackcamError;
