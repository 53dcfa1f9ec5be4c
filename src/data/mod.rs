pub mod geojson;
pub mod loader;
pub mod track;

pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use loader::{TrackLoader, TrackSource};
pub use track::Track;
