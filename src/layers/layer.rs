use serde::{Deserialize, Serialize};

use crate::layers::expression::{Color, LineGradient, PaintValue};
use crate::{Result, TrackcamError};

/// A style layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub id: String,
    #[serde(flatten)]
    pub kind: LayerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LayerKind {
    Sky {
        paint: SkyPaint,
    },
    Line {
        source: String,
        paint: LinePaint,
        layout: LineLayout,
    },
}

impl Layer {
    pub fn sky(id: impl Into<String>, paint: SkyPaint) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Sky { paint },
        }
    }

    pub fn line(
        id: impl Into<String>,
        source: impl Into<String>,
        paint: LinePaint,
        layout: LineLayout,
    ) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Line {
                source: source.into(),
                paint,
                layout,
            },
        }
    }

    /// Source this layer reads from, if any
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            LayerKind::Sky { .. } => None,
            LayerKind::Line { source, .. } => Some(source),
        }
    }

    /// Applies a paint property by its style name
    pub fn set_paint(&mut self, name: &str, value: PaintValue) -> Result<()> {
        let invalid = || {
            TrackcamError::Style(format!(
                "invalid value for '{}' on layer '{}'",
                name, self.id
            ))
        };

        match (&mut self.kind, name, value) {
            (LayerKind::Sky { paint }, "sky-atmosphere-color", PaintValue::Color(c)) => {
                paint.sky_atmosphere_color = c;
            }
            (LayerKind::Line { paint, .. }, "line-color", PaintValue::Color(c)) => {
                paint.line_color = c;
            }
            (LayerKind::Line { paint, .. }, "line-width", PaintValue::Number(n)) => {
                paint.line_width = n;
            }
            (LayerKind::Line { paint, .. }, "line-opacity", PaintValue::Number(n)) => {
                paint.line_opacity = n.clamp(0.0, 1.0);
            }
            (LayerKind::Line { paint, .. }, "line-gradient", PaintValue::Gradient(g)) => {
                paint.line_gradient = Some(g);
            }
            (
                _,
                "sky-atmosphere-color" | "line-color" | "line-width" | "line-opacity"
                | "line-gradient",
                _,
            ) => return Err(invalid()),
            (_, other, _) => {
                return Err(TrackcamError::Style(format!(
                    "unknown paint property '{}' on layer '{}'",
                    other, self.id
                )))
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkyType {
    Atmosphere,
    Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SkyPaint {
    pub sky_type: SkyType,
    pub sky_atmosphere_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinePaint {
    pub line_color: Color,
    pub line_width: f64,
    pub line_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_gradient: Option<LineGradient>,
}

impl LinePaint {
    /// Color of the line at `progress`, before opacity is applied
    pub fn color_at(&self, progress: f64) -> Color {
        match &self.line_gradient {
            Some(gradient) => gradient.evaluate(progress),
            None => self.line_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineLayout {
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for LineLayout {
    fn default() -> Self {
        Self {
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }
}

/// Atmospheric fog. `range` is relative to the distance between the camera
/// and the center of the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fog {
    pub range: [f64; 2],
    pub color: Color,
    pub horizon_blend: f64,
}

impl Fog {
    /// Fog opacity at `relative_distance` (distance over the camera-to-center distance)
    pub fn opacity_at(&self, relative_distance: f64) -> f64 {
        let [start, end] = self.range;
        if end <= start {
            return if relative_distance >= end { 1.0 } else { 0.0 };
        }
        let t = ((relative_distance - start) / (end - start)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            range: [0.5, 10.0],
            color: Color::WHITE,
            horizon_blend: 0.2,
        }
    }
}

/// Terrain settings referencing a raster-dem source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub source: String,
    pub exaggeration: f64,
}
