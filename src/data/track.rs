use geo::{HaversineDistance, HaversineIntermediate};
use geo_types::{Coord, LineString, Point};

use crate::{
    core::geo::LngLat,
    data::geojson::{GeoJson, Position},
    Result, TrackcamError,
};

/// An immutable GPS track.
///
/// Distances are great-circle distances on a sphere with the mean earth
/// radius, reported in kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    line: LineString<f64>,
    /// Distance from the first vertex to each vertex, in kilometres
    cumulative_km: Vec<f64>,
}

impl Track {
    pub fn new(vertices: Vec<LngLat>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(TrackcamError::InvalidTrack(
                "track has no vertices".to_string(),
            ));
        }

        let line: LineString<f64> = vertices
            .iter()
            .map(|v| Coord { x: v.lng, y: v.lat })
            .collect();

        let mut cumulative_km = Vec::with_capacity(vertices.len());
        let mut travelled = 0.0;
        cumulative_km.push(travelled);
        for segment in line.lines() {
            travelled += Point::from(segment.start).haversine_distance(&Point::from(segment.end)) / 1000.0;
            cumulative_km.push(travelled);
        }

        Ok(Self {
            line,
            cumulative_km,
        })
    }

    /// Builds a track from the first LineString in a GeoJSON document
    pub fn from_geojson(geojson: &GeoJson) -> Result<Self> {
        let coordinates = geojson.first_line_string().ok_or_else(|| {
            TrackcamError::InvalidTrack("no LineString geometry found".to_string())
        })?;
        Self::from_positions(coordinates)
    }

    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| match p.as_slice() {
                [lng, lat, ..] => Ok(LngLat::new(*lng, *lat)),
                _ => Err(TrackcamError::InvalidTrack(format!(
                    "position {} has fewer than two values",
                    i
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(vertices)
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = LngLat> + '_ {
        self.line.0.iter().map(|c| LngLat::new(c.x, c.y))
    }

    pub fn vertex(&self, index: usize) -> Option<LngLat> {
        self.line.0.get(index).map(|c| LngLat::new(c.x, c.y))
    }

    pub fn first(&self) -> LngLat {
        self.vertex(0).unwrap_or_default()
    }

    pub fn last(&self) -> LngLat {
        self.vertex(self.len().saturating_sub(1)).unwrap_or_default()
    }

    /// Total length in kilometres
    pub fn length_km(&self) -> f64 {
        self.cumulative_km.last().copied().unwrap_or(0.0)
    }

    /// Share of the total length covered at vertex `index`, in `[0, 1]`.
    /// This is what a line-progress expression sees at that vertex.
    pub fn progress_at_vertex(&self, index: usize) -> f64 {
        let total = self.length_km();
        if total <= 0.0 {
            return 0.0;
        }
        self.cumulative_km
            .get(index)
            .map_or(1.0, |d| (d / total).clamp(0.0, 1.0))
    }

    /// Point `distance_km` along the track.
    ///
    /// Distances at or below zero give the first vertex; distances past the
    /// end give the last vertex.
    pub fn along(&self, distance_km: f64) -> LngLat {
        if distance_km <= 0.0 || self.len() == 1 {
            return self.first();
        }

        let end = self.cumulative_km.partition_point(|&d| d <= distance_km);
        if end >= self.len() {
            return self.last();
        }
        let start = end - 1;

        let segment_km = self.cumulative_km[end] - self.cumulative_km[start];
        let a = Point::from(self.line.0[start]);
        if segment_km <= 0.0 {
            return a.into();
        }
        let b = Point::from(self.line.0[end]);
        let fraction = (distance_km - self.cumulative_km[start]) / segment_km;
        a.haversine_intermediate(&b, fraction).into()
    }

    /// Point at `fraction` of the total length
    pub fn along_fraction(&self, fraction: f64) -> LngLat {
        self.along(fraction * self.length_km())
    }

    /// The track as a GeoJSON LineString feature
    pub fn to_geojson(&self) -> GeoJson {
        GeoJson::line_string(self.line.0.iter().map(|c| [c.x, c.y]).collect())
    }
}
