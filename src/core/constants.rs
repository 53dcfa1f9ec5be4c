//! Scene constants for the camera comparison.
//! Keeping them in a single place makes it easier to tweak the flyover.

/// Mean earth radius in metres, shared with the haversine helpers in `geo`.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Camera pitch in degrees, for both the initial view and the flyover.
pub const PITCH: f64 = 50.0;

/// Total flyover time in milliseconds.
pub const ANIMATION_DURATION_MS: f64 = 60_000.0;

/// Camera altitude above the ground anchor, in metres.
pub const ALTITUDE: f64 = 8_000.0;

/// Degrees of bearing rotation per unit of phase.
pub const BEARING_RATE: f64 = 400.0;

/// Weight of the previous camera position when smoothing.
pub const SMOOTH_FACTOR: f64 = 0.95;

/// Largest usable smoothing weight. At 1 the smoothed camera never moves.
pub const MAX_SMOOTH_FACTOR: f64 = 0.99;

/// Approximate metres per degree of longitude used by the corrector.
pub const METERS_PER_DEGREE_LNG: f64 = 70_000.0;

/// Approximate metres per degree of latitude used by the corrector.
pub const METERS_PER_DEGREE_LAT: f64 = 110_000.0;

/// Initial zoom for both maps.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Vertical field of view of the free camera, in radians.
pub const CAMERA_FOV: f64 = 0.6435011087932844;

/// Source and layer ids used by the path layer.
pub const TRACK_SOURCE_ID: &str = "track";
pub const TRACK_LAYER_ID: &str = "track-line";

/// Source and layer ids used by the 3D scene dressing.
pub const DEM_SOURCE_ID: &str = "mapbox-dem";
pub const SKY_LAYER_ID: &str = "sky";

/// Paint property driven every frame.
pub const LINE_GRADIENT: &str = "line-gradient";
