use serde::{Deserialize, Serialize};

use crate::data::geojson::GeoJson;

/// Data sources a layer can draw from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Source {
    /// Inline GeoJSON. `line_metrics` must be on for `line-gradient` to work.
    Geojson {
        data: GeoJson,
        #[serde(rename = "lineMetrics", default)]
        line_metrics: bool,
    },
    /// Elevation tiles used by terrain
    RasterDem {
        url: String,
        #[serde(rename = "tileSize")]
        tile_size: u32,
        maxzoom: u8,
    },
}

impl Source {
    pub fn geojson(data: GeoJson, line_metrics: bool) -> Self {
        Source::Geojson { data, line_metrics }
    }

    pub fn raster_dem(url: impl Into<String>, tile_size: u32, maxzoom: u8) -> Self {
        Source::RasterDem {
            url: url.into(),
            tile_size,
            maxzoom,
        }
    }

    pub fn has_line_metrics(&self) -> bool {
        matches!(
            self,
            Source::Geojson {
                line_metrics: true,
                ..
            }
        )
    }

    pub fn is_raster_dem(&self) -> bool {
        matches!(self, Source::RasterDem { .. })
    }
}
