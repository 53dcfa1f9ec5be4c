use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use trackcam::{
    runtime::FrameClock,
    ui::UiMapExt,
    Comparison, ComparisonConfig, PaneStatus, TrackLoader,
};

const CONFIG_FILE: &str = "trackcam.json";

/// Flyover comparison viewer
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?.with_env_token();
    if config.access_token.is_none() {
        log::warn!("no access token configured; remote styles and tiles are unavailable");
    }

    let track = TrackLoader::new()
        .load(&config.track)
        .await
        .with_context(|| format!("failed to load track from {}", config.track))?;
    let comparison = Comparison::new(config, Arc::new(track))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("trackcam - raw vs smoothed camera"),
        ..Default::default()
    };

    eframe::run_native(
        "trackcam-app",
        options,
        Box::new(|_cc| Box::new(TrackcamApp::new(comparison))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;

    Ok(())
}

fn load_config() -> anyhow::Result<ComparisonConfig> {
    if Path::new(CONFIG_FILE).exists() {
        log::info!("reading {}", CONFIG_FILE);
        ComparisonConfig::from_file(CONFIG_FILE)
            .with_context(|| format!("invalid {}", CONFIG_FILE))
    } else {
        Ok(ComparisonConfig::default())
    }
}

struct TrackcamApp {
    comparison: Comparison,
    clock: FrameClock,
    loaded: bool,
}

impl TrackcamApp {
    fn new(comparison: Comparison) -> Self {
        Self {
            comparison,
            clock: FrameClock::new(),
            loaded: false,
        }
    }

    fn status_line(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Track: {} vertices, {:.1} km",
                self.comparison.track().len(),
                self.comparison.track().length_km()
            ));
            for pane in self.comparison.panes() {
                ui.separator();
                let status = match pane.status() {
                    PaneStatus::Waiting => "waiting".to_string(),
                    PaneStatus::Animating => match pane.last_sample() {
                        Some(sample) => format!("{:.0}%", sample.phase * 100.0),
                        None => "starting".to_string(),
                    },
                    PaneStatus::Finished => "done".to_string(),
                    PaneStatus::Failed(reason) => format!("failed: {reason}"),
                };
                ui.label(format!("{}: {}", pane.label(), status));
            }
        });
    }
}

impl eframe::App for TrackcamApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The window is up, so both styles count as loaded
        if !self.loaded {
            self.comparison.load_all();
            self.loaded = true;
        }
        let running = self.comparison.on_frame(self.clock.now_ms());

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.status_line(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let track = self.comparison.track();
            ui.columns(2, |columns| {
                for (column, pane) in columns.iter_mut().zip(self.comparison.panes()) {
                    column.pane_view(pane, track);
                }
            });
        });

        if running {
            ctx.request_repaint();
        }
    }
}
