//! Prelude module for common trackcam types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use trackcam::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    camera::FreeCameraOptions,
    config::{
        AnimationConfig, ComparisonConfig, ComparisonPreset, MapStyleConfig, Projection,
        SceneStyleConfig, SmoothingConfig,
    },
    geo::{LngLat, MercatorCoordinate},
    map::{MapEvent, MapOptions, SceneMap},
};

pub use crate::layers::{Color, Fog, Layer, LineGradient, PaintValue, Source, Terrain};

pub use crate::data::{GeoJson, Track, TrackLoader, TrackSource};

pub use crate::animation::{
    compute_camera_position, AnimationHandle, AnimationReport, AnimatorOptions, CameraPosition,
    FrameOutcome, FrameSample, PathAnimator, Smoothing,
};

pub use crate::comparison::{Comparison, Pane, PaneStatus, Side};

pub use crate::runtime::{FrameClock, FrameRequest};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::run_headless;

pub use crate::traits::{FrameScheduler, MapEngine};

#[cfg(feature = "egui")]
pub use crate::ui::{MapView, UiMapExt};

pub use crate::{Error as TrackcamError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
