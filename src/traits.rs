//! Seams between the flyover logic and its host
//!
//! The animator never talks to a concrete renderer or event loop. It drives
//! a [`MapEngine`] for style and camera updates and asks a [`FrameScheduler`]
//! for the next frame, so the same code runs inside the egui viewer, the
//! headless runner and the tests.

use crate::{
    core::camera::FreeCameraOptions,
    layers::{Fog, Layer, PaintValue, Source, Terrain},
    Result,
};

/// Capabilities the flyover needs from a map rendering engine
pub trait MapEngine {
    /// Registers a data source under `id`
    fn add_source(&mut self, id: &str, source: Source) -> Result<()>;

    /// Appends a layer on top of the existing ones
    fn add_layer(&mut self, layer: Layer) -> Result<()>;

    /// Updates one paint property of an existing layer
    fn set_paint_property(&mut self, layer_id: &str, name: &str, value: PaintValue) -> Result<()>;

    fn set_fog(&mut self, fog: Fog);

    /// Enables terrain from a raster-dem source
    fn set_terrain(&mut self, terrain: Terrain) -> Result<()>;

    fn free_camera_options(&self) -> FreeCameraOptions;

    fn set_free_camera_options(&mut self, options: FreeCameraOptions);
}

/// One-shot frame requests.
///
/// Each call asks the host for exactly one more frame; the host answers by
/// calling back into the animator with the frame timestamp.
pub trait FrameScheduler {
    fn schedule_next_tick(&mut self);
}
