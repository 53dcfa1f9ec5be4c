use crate::{
    animation::animator::FrameSample,
    core::{constants::TRACK_LAYER_ID, map::SceneMap},
    data::track::Track,
    layers::{Color, Fog, LayerKind},
    rendering::camera::{PerspectiveCamera, ProjectedPoint},
    traits::MapEngine,
};
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget};
use nalgebra::Point3;

/// Ground color of the dark base style
const GROUND: Color = Color::rgb(25, 26, 26);
const GRID: Color = Color::rgb(58, 60, 62);
const GRID_SPACING_M: f64 = 2_000.0;
const GRID_EXTENT_M: f64 = 40_000.0;
const HORIZON_BANDS: usize = 12;

/// Immediate-mode view of a [`SceneMap`]
///
/// Paints the sky, a flat ground with a grid anchored to the world and the
/// track line as the map's `line-gradient` currently reveals it, all seen
/// through the map's free camera.
///
/// ```rust,ignore
/// ui.add(MapView::new(pane.map(), &track).label("Smoothed"));
/// ```
pub struct MapView<'a> {
    map: &'a SceneMap,
    track: &'a Track,
    size: Option<Vec2>,
    label: Option<String>,
    sample: Option<FrameSample>,
}

impl<'a> MapView<'a> {
    pub fn new(map: &'a SceneMap, track: &'a Track) -> Self {
        Self {
            map,
            track,
            size: None,
            label: None,
            sample: None,
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Shows phase and bearing of the latest frame
    pub fn sample(mut self, sample: Option<&FrameSample>) -> Self {
        self.sample = sample.copied();
        self
    }

    fn sky_color(&self) -> Color {
        self.map
            .layers()
            .iter()
            .find_map(|layer| match &layer.kind {
                LayerKind::Sky { paint } => Some(paint.sky_atmosphere_color),
                LayerKind::Line { .. } => None,
            })
            .unwrap_or(Color::BLACK)
    }

    fn paint_sky_and_ground(&self, painter: &egui::Painter, rect: Rect, camera: &PerspectiveCamera) {
        let horizon = rect.top() + camera.horizon_y() as f32;
        let fog = self.map.fog();
        let sky = self.sky_color();

        painter.rect_filled(Rect::from_min_max(rect.min, Pos2::new(rect.right(), horizon)), 0.0, to_color32(sky));
        painter.rect_filled(
            Rect::from_min_max(Pos2::new(rect.left(), horizon), rect.max),
            0.0,
            to_color32(GROUND),
        );

        // Haze just above the horizon
        if let Some(fog) = fog {
            let blend_px = (fog.horizon_blend * rect.height() as f64) as f32;
            if blend_px > 0.0 && horizon > rect.top() {
                let band = blend_px / HORIZON_BANDS as f32;
                for i in 0..HORIZON_BANDS {
                    let bottom = horizon - band * i as f32;
                    let top = (bottom - band).max(rect.top());
                    if bottom <= rect.top() {
                        break;
                    }
                    let t = 1.0 - i as f64 / HORIZON_BANDS as f64;
                    painter.rect_filled(
                        Rect::from_min_max(Pos2::new(rect.left(), top), Pos2::new(rect.right(), bottom)),
                        0.0,
                        to_color32(sky.mix(&fog.color, t)),
                    );
                }
            }
        }
    }

    fn paint_grid(&self, painter: &egui::Painter, rect: Rect, camera: &PerspectiveCamera) {
        let (east, north) = camera.origin_world_m();
        let offset_x = -east.rem_euclid(GRID_SPACING_M);
        let offset_y = -north.rem_euclid(GRID_SPACING_M);
        let lines = (GRID_EXTENT_M / GRID_SPACING_M) as i32;
        let fog = self.map.fog();

        let segment = |a: Point3<f64>, b: Point3<f64>| {
            let (Some(pa), Some(pb)) = (camera.project_local(&a), camera.project_local(&b)) else {
                return;
            };
            let color = apply_fog(GRID, fog, (pa.depth + pb.depth) * 0.5, camera.center_distance());
            painter.line_segment([to_pos(rect, &pa), to_pos(rect, &pb)], Stroke::new(1.0, to_color32(color)));
        };

        for i in -lines..=lines {
            let fixed = i as f64 * GRID_SPACING_M;
            for j in -lines..lines {
                let from = j as f64 * GRID_SPACING_M;
                let to = from + GRID_SPACING_M;
                segment(
                    Point3::new(offset_x + fixed, offset_y + from, 0.0),
                    Point3::new(offset_x + fixed, offset_y + to, 0.0),
                );
                segment(
                    Point3::new(offset_x + from, offset_y + fixed, 0.0),
                    Point3::new(offset_x + to, offset_y + fixed, 0.0),
                );
            }
        }
    }

    fn paint_track(&self, painter: &egui::Painter, rect: Rect, camera: &PerspectiveCamera) {
        let Some((paint, _)) = self.map.line_layer(TRACK_LAYER_ID) else {
            return;
        };
        let fog = self.map.fog();
        let center_distance = camera.center_distance();
        let projected: Vec<Option<ProjectedPoint>> = self
            .track
            .vertices()
            .map(|v| camera.project(v, 0.0))
            .collect();

        for i in 1..projected.len() {
            let (Some(a), Some(b)) = (projected[i - 1], projected[i]) else {
                continue;
            };
            let progress =
                (self.track.progress_at_vertex(i - 1) + self.track.progress_at_vertex(i)) * 0.5;
            let color = paint.color_at(progress).with_opacity(paint.line_opacity);
            if color.is_transparent() {
                continue;
            }
            let depth = (a.depth + b.depth) * 0.5;
            let color = to_color32(apply_fog(color, fog, depth, center_distance));
            let width = line_width_px(paint.line_width, depth, center_distance);

            let (pa, pb) = (to_pos(rect, &a), to_pos(rect, &b));
            painter.line_segment([pa, pb], Stroke::new(width, color));
            painter.circle_filled(pb, width * 0.5, color);
            if i == 1 {
                painter.circle_filled(pa, width * 0.5, color);
            }
        }
    }

    fn paint_hud(&self, painter: &egui::Painter, rect: Rect) {
        let mut text = self.label.clone().unwrap_or_default();
        if let Some(sample) = &self.sample {
            if !text.is_empty() {
                text.push_str("  ");
            }
            text.push_str(&format!(
                "phase {:.2}  bearing {:.0}°",
                sample.phase,
                sample.bearing.rem_euclid(360.0)
            ));
        }
        if !text.is_empty() {
            painter.text(
                rect.left_top() + Vec2::new(10.0, 10.0),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }
    }
}

impl Widget for MapView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());
        let painter = ui.painter_at(rect);

        let camera = PerspectiveCamera::new(
            &self.map.free_camera_options(),
            [rect.width() as f64, rect.height() as f64],
        );

        match camera {
            Some(camera) => {
                self.paint_sky_and_ground(&painter, rect, &camera);
                self.paint_grid(&painter, rect, &camera);
                self.paint_track(&painter, rect, &camera);
            }
            None => {
                painter.rect_filled(rect, 0.0, to_color32(GROUND));
            }
        }
        self.paint_hud(&painter, rect);

        response
    }
}

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r,
        color.g,
        color.b,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Blends `color` toward the fog color by the fog opacity at `depth`
pub fn apply_fog(color: Color, fog: Option<&Fog>, depth: f64, center_distance: f64) -> Color {
    match fog {
        Some(fog) if center_distance > 0.0 => {
            color.mix(&fog.color, fog.opacity_at(depth / center_distance))
        }
        _ => color,
    }
}

/// On-screen width of a line painted `width` pixels wide at the view center
pub fn line_width_px(width: f64, depth: f64, center_distance: f64) -> f32 {
    if depth <= 0.0 {
        return width as f32;
    }
    (width * (center_distance / depth).clamp(0.25, 3.0)) as f32
}

fn to_pos(rect: Rect, p: &ProjectedPoint) -> Pos2 {
    Pos2::new(rect.left() + p.x as f32, rect.top() + p.y as f32)
}
