//! Map builder for fluent API configuration
//!
//! Both comparison maps are created through [`MapBuilder`] so they share
//! style, projection and initial view, and differ only in their container.

use crate::core::{
    config::{MapStyleConfig, Projection},
    geo::LngLat,
    map::{MapOptions, SceneMap},
};

/// Builder for creating and configuring [`SceneMap`] instances
#[derive(Debug, Clone)]
pub struct MapBuilder {
    options: MapOptions,
}

impl MapBuilder {
    /// Create a new MapBuilder for the given container
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            options: MapOptions {
                container: container.into(),
                ..MapOptions::default()
            },
        }
    }

    /// Applies style, projection and view settings from the config
    pub fn with_style_config(self, config: &MapStyleConfig) -> Self {
        self.with_style(config.style.clone())
            .with_projection(config.projection)
            .with_zoom(config.zoom)
            .with_pitch(config.pitch)
            .with_bearing(config.bearing)
            .with_viewport_height(config.viewport_height)
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.options.style = style.into();
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.options.projection = projection;
        self
    }

    pub fn with_center(mut self, center: LngLat) -> Self {
        self.options.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.options.zoom = zoom.clamp(0.0, 22.0);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.options.pitch = pitch.clamp(0.0, 85.0);
        self
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.options.bearing = bearing;
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.options.access_token = token;
        self
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.options.viewport_height = height.max(1.0);
        self
    }

    /// The options collected so far
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn build(self) -> SceneMap {
        SceneMap::new(self.options)
    }
}
