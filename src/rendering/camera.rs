use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::core::{
    camera::FreeCameraOptions,
    constants::CAMERA_FOV,
    geo::{LngLat, MercatorCoordinate},
};

const Z_NEAR: f64 = 1.0;
const Z_FAR: f64 = 1.0e7;

/// A point projected into the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Pixels from the left edge
    pub x: f64,
    /// Pixels from the top edge
    pub y: f64,
    /// Distance along the viewing direction, in metres
    pub depth: f64,
}

/// 3D perspective camera built from free camera options
///
/// Works in a local frame centered on the ground point beneath the camera:
/// x east, y north, z up, all in metres. The frame is flat, which holds well
/// enough for the few tens of kilometres a flyover shows.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    origin: MercatorCoordinate,
    meters_per_unit: f64,
    altitude: f64,
    pitch: f64,
    bearing: f64,
    viewport: [f64; 2],
    view_projection_matrix: Matrix4<f64>,
}

impl PerspectiveCamera {
    /// Returns `None` when the camera has no position or the viewport is empty
    pub fn new(options: &FreeCameraOptions, viewport: [f64; 2]) -> Option<Self> {
        let position = options.position?;
        if viewport[0] <= 0.0 || viewport[1] <= 0.0 {
            return None;
        }

        let origin = MercatorCoordinate::new(position.x, position.y, 0.0);
        let meters_per_unit = 1.0 / position.meter_in_mercator_units();
        let altitude = position.to_altitude();
        let pitch = options.pitch().to_radians();
        let bearing = options.bearing().to_radians();

        let forward = Vector3::new(
            bearing.sin() * pitch.sin(),
            bearing.cos() * pitch.sin(),
            -pitch.cos(),
        );
        let up = Vector3::new(
            bearing.sin() * pitch.cos(),
            bearing.cos() * pitch.cos(),
            pitch.sin(),
        );

        let eye = Point3::new(0.0, 0.0, altitude);
        let view = Matrix4::look_at_rh(&eye, &(eye + forward), &up);
        let projection =
            Matrix4::new_perspective(viewport[0] / viewport[1], CAMERA_FOV, Z_NEAR, Z_FAR);

        Some(Self {
            origin,
            meters_per_unit,
            altitude,
            pitch: options.pitch(),
            bearing: options.bearing(),
            viewport,
            view_projection_matrix: projection * view,
        })
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn viewport(&self) -> [f64; 2] {
        self.viewport
    }

    /// Ground point beneath the camera in world metres (east, north), for
    /// anchoring patterns that must not slide with the camera
    pub fn origin_world_m(&self) -> (f64, f64) {
        (
            self.origin.x * self.meters_per_unit,
            -self.origin.y * self.meters_per_unit,
        )
    }

    /// Position of `lng_lat` at `altitude` in the local frame
    pub fn to_local(&self, lng_lat: LngLat, altitude: f64) -> Point3<f64> {
        let m = MercatorCoordinate::from_lng_lat(lng_lat, 0.0);
        Point3::new(
            (m.x - self.origin.x) * self.meters_per_unit,
            -(m.y - self.origin.y) * self.meters_per_unit,
            altitude,
        )
    }

    pub fn project(&self, lng_lat: LngLat, altitude: f64) -> Option<ProjectedPoint> {
        self.project_local(&self.to_local(lng_lat, altitude))
    }

    /// Projects a local point. `None` for points behind the camera.
    pub fn project_local(&self, point: &Point3<f64>) -> Option<ProjectedPoint> {
        let clip = self.view_projection_matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= Z_NEAR {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(ProjectedPoint {
            x: (ndc_x + 1.0) * 0.5 * self.viewport[0],
            y: (1.0 - ndc_y) * 0.5 * self.viewport[1],
            depth: clip.w,
        })
    }

    /// Screen row of the horizon of a flat ground, clamped to the viewport
    pub fn horizon_y(&self) -> f64 {
        let above_center = (90.0 - self.pitch).to_radians().tan() / (CAMERA_FOV / 2.0).tan();
        ((1.0 - above_center) * 0.5 * self.viewport[1]).clamp(0.0, self.viewport[1])
    }

    /// Distance from the camera to the ground point it looks at
    pub fn center_distance(&self) -> f64 {
        self.altitude / self.pitch.to_radians().cos().max(1e-3)
    }
}
