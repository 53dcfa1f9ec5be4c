use crate::{
    core::{
        camera::FreeCameraOptions,
        config::Projection,
        geo::LngLat,
    },
    layers::{Fog, Layer, LayerKind, LinePaint, PaintValue, Source, Terrain},
    prelude::HashMap,
    traits::MapEngine,
    Result, TrackcamError,
};

/// Options a map is created with
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Name of the element (or pane) hosting the map
    pub container: String,
    pub style: String,
    pub projection: Projection,
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub access_token: Option<String>,
    pub viewport_height: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            style: "mapbox://styles/mapbox/dark-v10".to_string(),
            projection: Projection::Globe,
            center: LngLat::default(),
            zoom: crate::core::constants::DEFAULT_ZOOM,
            pitch: 0.0,
            bearing: 0.0,
            access_token: None,
            viewport_height: 800.0,
        }
    }
}

/// Events a map reports to whoever drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// The style is ready; sources and layers may be added from now on
    Load,
}

/// In-memory map scene.
///
/// Holds everything a renderer needs to draw one frame: the style objects
/// added so far and the free camera. The egui viewer paints it; tests and
/// the headless runner inspect it directly.
#[derive(Debug, Clone)]
pub struct SceneMap {
    options: MapOptions,
    sources: HashMap<String, Source>,
    layers: Vec<Layer>,
    fog: Option<Fog>,
    terrain: Option<Terrain>,
    camera: FreeCameraOptions,
    loaded: bool,
    events: Vec<MapEvent>,
}

impl SceneMap {
    pub fn new(options: MapOptions) -> Self {
        let camera = FreeCameraOptions::from_view(
            options.center,
            options.zoom,
            options.pitch,
            options.bearing,
            options.viewport_height,
        );
        log::debug!(
            "map '{}' created at {:.4}, {:.4} (zoom {})",
            options.container,
            options.center.lng,
            options.center.lat,
            options.zoom
        );

        Self {
            options,
            sources: HashMap::default(),
            layers: Vec::new(),
            fog: None,
            terrain: None,
            camera,
            loaded: false,
            events: Vec::new(),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn container(&self) -> &str {
        &self.options.container
    }

    /// Marks the style as loaded. Only the first call queues [`MapEvent::Load`].
    pub fn fire_load(&mut self) {
        if !self.loaded {
            self.loaded = true;
            self.events.push(MapEvent::Load);
            log::debug!("map '{}' loaded", self.options.container);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Drains pending events
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers in drawing order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Paint of a line layer together with the source it draws
    pub fn line_layer(&self, id: &str) -> Option<(&LinePaint, &Source)> {
        match &self.layer(id)?.kind {
            LayerKind::Line { source, paint, .. } => Some((paint, self.sources.get(source)?)),
            LayerKind::Sky { .. } => None,
        }
    }

    pub fn fog(&self) -> Option<&Fog> {
        self.fog.as_ref()
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }
}

impl MapEngine for SceneMap {
    fn add_source(&mut self, id: &str, source: Source) -> Result<()> {
        if self.sources.contains_key(id) {
            return Err(TrackcamError::Style(format!(
                "source '{}' already exists",
                id
            )));
        }
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    fn add_layer(&mut self, layer: Layer) -> Result<()> {
        if self.layer(&layer.id).is_some() {
            return Err(TrackcamError::Style(format!(
                "layer '{}' already exists",
                layer.id
            )));
        }
        if let Some(source) = layer.source() {
            if !self.sources.contains_key(source) {
                return Err(TrackcamError::UnknownSource(source.to_string()));
            }
        }
        self.layers.push(layer);
        Ok(())
    }

    fn set_paint_property(&mut self, layer_id: &str, name: &str, value: PaintValue) -> Result<()> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| TrackcamError::UnknownLayer(layer_id.to_string()))?;

        if name == "line-gradient" {
            let has_metrics = layer
                .source()
                .and_then(|s| self.sources.get(s))
                .map_or(false, Source::has_line_metrics);
            if !has_metrics {
                return Err(TrackcamError::Style(format!(
                    "layer '{}' needs a source with line metrics for 'line-gradient'",
                    layer_id
                )));
            }
        }

        layer.set_paint(name, value)
    }

    fn set_fog(&mut self, fog: Fog) {
        self.fog = Some(fog);
    }

    fn set_terrain(&mut self, terrain: Terrain) -> Result<()> {
        match self.sources.get(&terrain.source) {
            Some(source) if source.is_raster_dem() => {
                self.terrain = Some(terrain);
                Ok(())
            }
            Some(_) => Err(TrackcamError::Style(format!(
                "terrain source '{}' is not a raster-dem source",
                terrain.source
            ))),
            None => Err(TrackcamError::UnknownSource(terrain.source)),
        }
    }

    fn free_camera_options(&self) -> FreeCameraOptions {
        self.camera
    }

    fn set_free_camera_options(&mut self, options: FreeCameraOptions) {
        self.camera = options;
    }
}
