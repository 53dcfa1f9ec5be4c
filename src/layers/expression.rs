use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color as understood by style paint properties.
///
/// Serialized as a CSS color string (`"rgba(r, g, b, a)"`), so style
/// objects written out with `serde_json` read like hand-written styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Multiplies the alpha channel, e.g. by a layer opacity
    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            a: (self.a as f64 * opacity).clamp(0.0, 1.0) as f32,
            ..*self
        }
    }

    /// Linear blend of the color channels, keeping `self`'s alpha
    pub fn mix(&self, other: &Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "transparent" => return Ok(Color::TRANSPARENT),
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            "yellow" => return Ok(Color::YELLOW),
            _ => {}
        }

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() || hex.len() != 6 {
                return Err(format!("unsupported hex color '{}'", s));
            }
            let parse = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{}: {}", s, e))
            };
            return Ok(Color::rgb(parse(0)?, parse(2)?, parse(4)?));
        }

        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(format!("unsupported color '{}'", s));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| format!("unterminated color '{}'", s))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!("expected {} components in '{}'", expected, s));
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|e| format!("{}: {}", s, e));
        let alpha = if has_alpha {
            parts[3]
                .parse::<f32>()
                .map_err(|e| format!("{}: {}", s, e))?
                .clamp(0.0, 1.0)
        } else {
            1.0
        };
        Ok(Color::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A `step` expression over `line-progress`.
///
/// Progress below the first stop gets `base`; otherwise the output of the
/// last stop whose input is not greater than the progress applies.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGradient {
    pub base: Color,
    pub stops: Vec<(f64, Color)>,
}

impl LineGradient {
    pub fn new(base: Color) -> Self {
        Self {
            base,
            stops: Vec::new(),
        }
    }

    /// Adds a stop. Stops must be added in increasing order.
    pub fn stop(mut self, input: f64, output: Color) -> Self {
        self.stops.push((input, output));
        self
    }

    /// Color of the line at `progress` in `[0, 1]`
    pub fn evaluate(&self, progress: f64) -> Color {
        self.stops
            .iter()
            .take_while(|(input, _)| *input <= progress)
            .last()
            .map(|(_, color)| *color)
            .unwrap_or(self.base)
    }
}

impl Serialize for LineGradient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3 + self.stops.len() * 2))?;
        seq.serialize_element("step")?;
        seq.serialize_element(&["line-progress"])?;
        seq.serialize_element(&self.base)?;
        for (input, output) in &self.stops {
            seq.serialize_element(input)?;
            seq.serialize_element(output)?;
        }
        seq.end()
    }
}

/// Value passed to `set_paint_property`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PaintValue {
    Color(Color),
    Number(f64),
    Gradient(LineGradient),
}

impl From<Color> for PaintValue {
    fn from(c: Color) -> Self {
        PaintValue::Color(c)
    }
}

impl From<f64> for PaintValue {
    fn from(n: f64) -> Self {
        PaintValue::Number(n)
    }
}

impl From<LineGradient> for PaintValue {
    fn from(g: LineGradient) -> Self {
        PaintValue::Gradient(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let c: Color = "rgba(85, 151, 210, 0.5)".parse().unwrap();
        assert_eq!(c, Color::rgba(85, 151, 210, 0.5));
        assert_eq!("rgba(0,0,0,0)".parse::<Color>().unwrap(), Color::TRANSPARENT);
        assert_eq!("#ffff00".parse::<Color>().unwrap(), Color::YELLOW);
        assert!("hsl(0, 0%, 10%)".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii_hex() {
        // Six bytes, five chars: must error rather than split a char
        assert!("#aéaaa".parse::<Color>().is_err());
        assert!("#ffé".parse::<Color>().is_err());
        assert!("#12345g".parse::<Color>().is_err());
    }

    #[test]
    fn test_step_gradient_cutoff() {
        let gradient = LineGradient::new(Color::YELLOW).stop(0.4, Color::TRANSPARENT);
        assert_eq!(gradient.evaluate(0.0), Color::YELLOW);
        assert_eq!(gradient.evaluate(0.39), Color::YELLOW);
        assert_eq!(gradient.evaluate(0.4), Color::TRANSPARENT);
        assert_eq!(gradient.evaluate(1.0), Color::TRANSPARENT);
    }

    #[test]
    fn test_gradient_serializes_as_step_expression() {
        let gradient = LineGradient::new(Color::YELLOW).stop(0.25, Color::TRANSPARENT);
        let json = serde_json::to_value(&gradient).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "step",
                ["line-progress"],
                "rgba(255, 255, 0, 1)",
                0.25,
                "rgba(0, 0, 0, 0)"
            ])
        );
    }

    #[test]
    fn test_mix_and_opacity() {
        let c = Color::BLACK.mix(&Color::WHITE, 0.5);
        assert_eq!((c.r, c.g, c.b), (128, 128, 128));
        assert_eq!(Color::YELLOW.with_opacity(0.8).a, 0.8);
    }
}
