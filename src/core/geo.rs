use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::EARTH_RADIUS;

/// Circumference of the earth at the equator, in metres
pub const EARTH_CIRCUMFERENCE: f64 = 2.0 * PI * EARTH_RADIUS;

const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with longitude and latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    /// Creates a new coordinate
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl From<LngLat> for geo_types::Point<f64> {
    fn from(p: LngLat) -> Self {
        geo_types::Point::new(p.lng, p.lat)
    }
}

impl From<geo_types::Point<f64>> for LngLat {
    fn from(p: geo_types::Point<f64>) -> Self {
        Self::new(p.x(), p.y())
    }
}

impl Default for LngLat {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A position in normalized Web Mercator space.
///
/// `x` and `y` span `[0, 1]` across the world, with `y` growing southward.
/// `z` is an altitude expressed in the same units, so one metre is smaller
/// in mercator units near the equator than near the poles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercatorCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MercatorCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projects a coordinate and an altitude in metres
    pub fn from_lng_lat(lng_lat: LngLat, altitude: f64) -> Self {
        let lat = LngLat::clamp_lat(lng_lat.lat);
        let x = (180.0 + lng_lat.lng) / 360.0;
        let y = (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0;
        let z = altitude / circumference_at_latitude(lat);
        Self::new(x, y, z)
    }

    /// Converts back to a geographic coordinate, dropping altitude
    pub fn to_lng_lat(&self) -> LngLat {
        let lng = self.x * 360.0 - 180.0;
        let y2 = 180.0 - self.y * 360.0;
        let lat = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;
        LngLat::new(lng, lat)
    }

    /// Altitude in metres
    pub fn to_altitude(&self) -> f64 {
        self.z * circumference_at_latitude(self.to_lng_lat().lat)
    }

    /// Size of one metre in mercator units at this position's latitude
    pub fn meter_in_mercator_units(&self) -> f64 {
        1.0 / circumference_at_latitude(self.to_lng_lat().lat)
    }
}

/// Length of the parallel through `lat`, in metres
pub fn circumference_at_latitude(lat: f64) -> f64 {
    EARTH_CIRCUMFERENCE * lat.to_radians().cos()
}
