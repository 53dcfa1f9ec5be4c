//! Camera ground-anchor correction
//!
//! A camera placed straight above the current track point would look at a
//! spot well ahead of it once pitched, leaving the freshly drawn line at the
//! bottom edge or out of view. The corrector moves the anchor back against
//! the bearing by the horizontal distance the pitch covers at the given
//! altitude, so the point being drawn stays near the center of the view.

use crate::{
    animation::interpolation::Interpolatable,
    core::{
        constants::{
            MAX_SMOOTH_FACTOR, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LNG, SMOOTH_FACTOR,
        },
        geo::LngLat,
    },
};

/// Ground point directly beneath the camera
pub type CameraPosition = LngLat;

/// How a new anchor is combined with the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Use the new anchor as is
    Off,
    /// Blend toward the previous anchor; the value is the previous anchor's weight
    Lerp(f64),
}

impl Smoothing {
    /// The factor is clamped to `[0, MAX_SMOOTH_FACTOR]`
    pub fn from_flag(smooth: bool, factor: f64) -> Self {
        if smooth {
            Smoothing::Lerp(factor.clamp(0.0, MAX_SMOOTH_FACTOR))
        } else {
            Smoothing::Off
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Smoothing::Lerp(_))
    }
}

/// Corrected camera anchor with the default blend factor when `smooth` is set
pub fn compute_camera_position(
    previous: Option<CameraPosition>,
    pitch: f64,
    bearing: f64,
    target: LngLat,
    altitude: f64,
    smooth: bool,
) -> CameraPosition {
    correct_camera_position(
        previous,
        pitch,
        bearing,
        target,
        altitude,
        Smoothing::from_flag(smooth, SMOOTH_FACTOR),
    )
}

/// Corrected camera anchor for a camera at `altitude` metres, looking at
/// `target` with `pitch` and `bearing` in degrees.
pub fn correct_camera_position(
    previous: Option<CameraPosition>,
    pitch: f64,
    bearing: f64,
    target: LngLat,
    altitude: f64,
    smoothing: Smoothing,
) -> CameraPosition {
    let bearing_rad = bearing.to_radians();
    let pitch_rad = (90.0 - pitch).to_radians();

    let ground_distance = altitude / pitch_rad.tan();
    let lng_diff = ground_distance * (-bearing_rad).sin() / METERS_PER_DEGREE_LNG;
    let lat_diff = ground_distance * (-bearing_rad).cos() / METERS_PER_DEGREE_LAT;

    let corrected = LngLat::new(target.lng + lng_diff, target.lat - lat_diff);

    match (smoothing, previous) {
        (Smoothing::Lerp(factor), Some(previous)) => corrected.lerp(&previous, factor),
        _ => corrected,
    }
}
