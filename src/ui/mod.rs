pub mod widget;

pub use widget::{apply_fog, line_width_px, to_color32, MapView};

use crate::{comparison::Pane, data::track::Track};

pub trait UiMapExt {
    /// Paints one comparison pane with its label and latest frame
    fn pane_view(&mut self, pane: &Pane, track: &Track) -> egui::Response;
}

impl UiMapExt for egui::Ui {
    fn pane_view(&mut self, pane: &Pane, track: &Track) -> egui::Response {
        self.add(
            MapView::new(pane.map(), track)
                .label(pane.label())
                .sample(pane.last_sample()),
        )
    }
}
