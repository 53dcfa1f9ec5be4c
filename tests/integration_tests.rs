use std::sync::Arc;

use trackcam::{
    constants::TRACK_LAYER_ID, Comparison, ComparisonConfig, ComparisonPreset, LngLat, PaneStatus,
    Side, Track, TrackLoader,
};

/// End-to-end scenarios: loading a track, wiring both maps on load and
/// running the comparison to completion
#[cfg(test)]
mod integration_tests {
    use super::*;

    const STAGE: &str = r#"{
        "type": "Feature",
        "properties": { "name": "test stage" },
        "geometry": {
            "type": "LineString",
            "coordinates": [[6.13, 45.90], [6.18, 45.93], [6.25, 45.91], [6.31, 45.86], [6.40, 45.84]]
        }
    }"#;

    fn quick_config(duration_ms: f64) -> ComparisonConfig {
        let mut config = ComparisonPreset::Quick.resolve();
        config.animation.duration_ms = duration_ms;
        config
    }

    fn stage() -> Arc<Track> {
        Arc::new(TrackLoader::parse(STAGE).unwrap())
    }

    /// Tracks are read from disk through the async loader
    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_load_track_from_file() {
        let path = std::env::temp_dir().join(format!("trackcam-stage-{}.geojson", std::process::id()));
        std::fs::write(&path, STAGE).unwrap();

        let track = TrackLoader::new()
            .load(path.to_str().unwrap())
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(track.len(), 5);
        assert_eq!(track.first(), LngLat::new(6.13, 45.90));
        assert!(track.length_km() > 20.0 && track.length_km() < 30.0);
    }

    /// A missing file surfaces as an IO error
    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_missing_track_file() {
        let result = TrackLoader::new()
            .load("./does/not/exist.geojson")
            .await;
        assert!(matches!(result, Err(trackcam::TrackcamError::Io(_))));
    }

    /// Loading a map adds the whole scene before the first animated frame
    #[test]
    fn test_load_event_wires_scene() {
        let mut cmp = Comparison::new(quick_config(1000.0), stage()).unwrap();
        cmp.load_all();
        assert!(cmp.on_frame(0.0));

        for pane in cmp.panes() {
            let map = pane.map();
            assert!(map.fog().is_some());
            assert!(map.terrain().is_some());
            let (paint, source) = map.line_layer(TRACK_LAYER_ID).unwrap();
            assert!(source.has_line_metrics());
            // The first frame reveals nothing yet
            assert!(paint.color_at(0.5).is_transparent());
            assert_eq!(pane.status(), &PaneStatus::Animating);
        }
    }

    /// Both panes finish, and their last drawn phase never exceeds one
    #[test]
    fn test_full_run() {
        let mut cmp = Comparison::new(quick_config(500.0), stage()).unwrap();
        cmp.load_all();

        let mut handles = Vec::new();
        let mut last_phase = [0.0f64; 2];
        let mut now = 0.0;
        while cmp.on_frame(now) {
            for side in [Side::Left, Side::Right] {
                if let Some(handle) = cmp.take_handle(side) {
                    handles.push(handle);
                }
                if let Some(sample) = cmp.pane(side).last_sample() {
                    last_phase[side as usize] = sample.phase;
                }
            }
            now += 16.0;
        }

        assert!(last_phase.iter().all(|&p| p > 0.9 && p <= 1.0));
        assert_eq!(handles.len(), 2);
        for handle in handles {
            let report = futures::executor::block_on(handle).unwrap();
            assert!(report.frames > 0);
        }

        // With the whole line revealed, the end of the track is drawn
        let (paint, _) = cmp.pane(Side::Left).map().line_layer(TRACK_LAYER_ID).unwrap();
        assert!(!paint.color_at(0.9).is_transparent());
    }

    /// Raw and smoothed panes follow the same targets with different cameras
    #[test]
    fn test_panes_differ_only_in_smoothing() {
        let mut cmp = Comparison::new(quick_config(1000.0), stage()).unwrap();
        cmp.load_all();
        for now in [0.0, 200.0, 400.0] {
            cmp.on_frame(now);
        }

        let left = cmp.pane(Side::Left).last_sample().copied().unwrap();
        let right = cmp.pane(Side::Right).last_sample().copied().unwrap();
        assert_eq!(left.phase, right.phase);
        assert_eq!(left.bearing, right.bearing);
        assert_eq!(left.target, right.target);
        assert_ne!(left.camera_position, right.camera_position);
    }

    /// A JSON config overrides only what it names
    #[test]
    fn test_partial_json_config() {
        let config = ComparisonConfig::from_json_str(
            r#"{ "animation": { "duration_ms": 2500 }, "smoothing": { "factor": 0.8 } }"#,
        )
        .unwrap();
        assert_eq!(config.animation.duration_ms, 2500.0);
        assert_eq!(config.animation.altitude, 8000.0);
        assert_eq!(config.smoothing.factor, 0.8);
        assert_eq!(config.map, ComparisonConfig::default().map);
    }

    /// The viewer paints a pane inside an egui frame
    #[cfg(feature = "egui")]
    #[test]
    fn test_pane_renders_in_egui() {
        use trackcam::ui::UiMapExt;

        let mut cmp = Comparison::new(quick_config(1000.0), stage()).unwrap();
        cmp.load_all();
        cmp.on_frame(0.0);
        cmp.on_frame(300.0);

        let ctx = egui::Context::default();
        let mut rect = egui::Rect::NOTHING;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.pane_view(cmp.pane(Side::Left), cmp.track());
                rect = response.rect;
            });
        });

        assert!(rect.width() > 0.0);
        assert!(rect.height() > 0.0);
    }
}
