//! Style objects handed to a [`MapEngine`](crate::traits::MapEngine):
//! sources, layers, fog, terrain and the paint expressions they carry.

pub mod expression;
pub mod layer;
pub mod scene;
pub mod source;

pub use expression::{Color, LineGradient, PaintValue};
pub use layer::{Fog, Layer, LayerKind, LineLayout, LinePaint, SkyPaint, Terrain};
pub use scene::{add_3d, add_path_source_and_layer, line_cutoff};
pub use source::Source;
