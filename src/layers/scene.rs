//! Scene dressing applied to each map once its style has loaded.

use crate::{
    core::{
        config::SceneStyleConfig,
        constants::{DEM_SOURCE_ID, SKY_LAYER_ID, TRACK_LAYER_ID, TRACK_SOURCE_ID},
    },
    data::track::Track,
    layers::{
        expression::{Color, LineGradient},
        layer::{Layer, LineLayout, LinePaint, SkyPaint, SkyType, Terrain},
        source::Source,
    },
    traits::MapEngine,
    Result,
};

/// Adds fog, an atmosphere sky layer and exaggerated terrain
pub fn add_3d<E: MapEngine + ?Sized>(map: &mut E, style: &SceneStyleConfig) -> Result<()> {
    map.set_fog(style.fog.clone());

    map.add_layer(Layer::sky(
        SKY_LAYER_ID,
        SkyPaint {
            sky_type: SkyType::Atmosphere,
            sky_atmosphere_color: style.sky_atmosphere_color,
        },
    ))?;

    map.add_source(
        DEM_SOURCE_ID,
        Source::raster_dem(style.dem_url.clone(), style.dem_tile_size, style.dem_max_zoom),
    )?;
    map.set_terrain(Terrain {
        source: DEM_SOURCE_ID.to_string(),
        exaggeration: style.terrain_exaggeration,
    })
}

/// Adds the track source (with line metrics) and an initially invisible
/// line layer. The animator reveals it through `line-gradient`.
pub fn add_path_source_and_layer<E: MapEngine + ?Sized>(
    map: &mut E,
    track: &Track,
    style: &SceneStyleConfig,
) -> Result<()> {
    map.add_source(TRACK_SOURCE_ID, Source::geojson(track.to_geojson(), true))?;
    map.add_layer(Layer::line(
        TRACK_LAYER_ID,
        TRACK_SOURCE_ID,
        LinePaint {
            line_color: Color::TRANSPARENT,
            line_width: style.line_width,
            line_opacity: style.line_opacity,
            line_gradient: None,
        },
        LineLayout::default(),
    ))
}

/// Gradient drawing `color` from the start of the line up to `phase` and
/// nothing beyond it
pub fn line_cutoff(color: Color, phase: f64) -> LineGradient {
    LineGradient::new(color).stop(phase, Color::TRANSPARENT)
}
