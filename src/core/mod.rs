pub mod builder;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod map;

// Re-export commonly used types for convenience
pub use builder::MapBuilder;
pub use camera::FreeCameraOptions;
pub use config::{ComparisonConfig, ComparisonPreset};
pub use geo::{LngLat, MercatorCoordinate};
pub use map::{MapEvent, MapOptions, SceneMap};
