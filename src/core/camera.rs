use serde::{Deserialize, Serialize};

use crate::core::constants::CAMERA_FOV;
use crate::core::geo::{circumference_at_latitude, LngLat, MercatorCoordinate};

/// World size in pixels at zoom 0, for 512px tiles
const WORLD_SIZE_AT_ZOOM_0: f64 = 512.0;

/// Free camera state: a position in mercator space plus an orientation
/// given as pitch (0 looks straight down) and bearing (clockwise from north),
/// both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeCameraOptions {
    pub position: Option<MercatorCoordinate>,
    pitch: f64,
    bearing: f64,
}

impl FreeCameraOptions {
    pub fn new(position: Option<MercatorCoordinate>, pitch: f64, bearing: f64) -> Self {
        let mut options = Self {
            position,
            pitch: 0.0,
            bearing: 0.0,
        };
        options.set_pitch_bearing(pitch, bearing);
        options
    }

    /// Camera that frames `center` at `zoom` the way a regular map view would,
    /// for a viewport `viewport_height` pixels tall.
    pub fn from_view(
        center: LngLat,
        zoom: f64,
        pitch: f64,
        bearing: f64,
        viewport_height: f64,
    ) -> Self {
        let distance_px = 0.5 / (CAMERA_FOV / 2.0).tan() * viewport_height;
        let meters_per_px = circumference_at_latitude(center.lat)
            / (WORLD_SIZE_AT_ZOOM_0 * 2_f64.powf(zoom));
        let distance_m = distance_px * meters_per_px;

        let pitch_rad = pitch.clamp(0.0, 85.0).to_radians();
        let bearing_rad = bearing.to_radians();
        let ground_offset = distance_m * pitch_rad.sin();
        let altitude = distance_m * pitch_rad.cos();

        let c = MercatorCoordinate::from_lng_lat(center, 0.0);
        let scale = c.meter_in_mercator_units();
        // Step back from the center, opposite to the viewing direction
        let position = MercatorCoordinate::new(
            c.x - bearing_rad.sin() * ground_offset * scale,
            c.y + bearing_rad.cos() * ground_offset * scale,
            altitude * scale,
        );

        Self::new(Some(position), pitch, bearing)
    }

    /// Sets the orientation. Pitch is clamped to `[0, 90]` and bearing wrapped
    /// into `[0, 360)`.
    pub fn set_pitch_bearing(&mut self, pitch: f64, bearing: f64) {
        self.pitch = pitch.clamp(0.0, 90.0);
        self.bearing = bearing.rem_euclid(360.0);
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    /// Ground point beneath the camera
    pub fn ground_anchor(&self) -> Option<LngLat> {
        self.position.map(|p| p.to_lng_lat())
    }

    /// Camera altitude in metres
    pub fn altitude(&self) -> Option<f64> {
        self.position.map(|p| p.to_altitude())
    }
}

impl Default for FreeCameraOptions {
    fn default() -> Self {
        Self::new(None, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_is_wrapped() {
        let mut camera = FreeCameraOptions::default();
        camera.set_pitch_bearing(50.0, -200.0);
        assert_eq!(camera.pitch(), 50.0);
        assert!((camera.bearing() - 160.0).abs() < 1e-9);

        camera.set_pitch_bearing(120.0, 720.0);
        assert_eq!(camera.pitch(), 90.0);
        assert_eq!(camera.bearing(), 0.0);
    }

    #[test]
    fn test_from_view_sits_south_of_center_when_facing_north() {
        let center = LngLat::new(6.0, 45.0);
        let camera = FreeCameraOptions::from_view(center, 10.0, 50.0, 0.0, 800.0);
        let anchor = camera.ground_anchor().unwrap();
        assert!(anchor.lat < center.lat);
        assert!((anchor.lng - center.lng).abs() < 1e-9);
        assert!(camera.altitude().unwrap() > 1000.0);
    }

    #[test]
    fn test_top_down_view_is_above_center() {
        let center = LngLat::new(6.0, 45.0);
        let camera = FreeCameraOptions::from_view(center, 12.0, 0.0, 30.0, 800.0);
        let anchor = camera.ground_anchor().unwrap();
        assert!((anchor.lat - center.lat).abs() < 1e-9);
        assert!((anchor.lng - center.lng).abs() < 1e-9);
    }
}
