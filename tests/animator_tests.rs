use std::sync::Arc;

use trackcam::{
    compute_camera_position,
    constants::{LINE_GRADIENT, TRACK_LAYER_ID},
    layers::{Fog, Layer, PaintValue, Source, Terrain},
    AnimatorOptions, FrameScheduler, FreeCameraOptions, LngLat, MapEngine, PathAnimator, Smoothing,
    Track,
};

/// Tests that drive a path animator through a recording engine and a
/// manual scheduler, checking what it asks of the host frame by frame
#[cfg(test)]
mod animator_tests {
    use super::*;
    use trackcam::animation::FrameOutcome;

    /// Engine that accepts everything and remembers the calls
    #[derive(Default)]
    struct RecordingEngine {
        paints: Vec<(String, String, PaintValue)>,
        cameras: Vec<FreeCameraOptions>,
        camera: FreeCameraOptions,
    }

    impl MapEngine for RecordingEngine {
        fn add_source(&mut self, _id: &str, _source: Source) -> trackcam::Result<()> {
            Ok(())
        }

        fn add_layer(&mut self, _layer: Layer) -> trackcam::Result<()> {
            Ok(())
        }

        fn set_paint_property(
            &mut self,
            layer_id: &str,
            name: &str,
            value: PaintValue,
        ) -> trackcam::Result<()> {
            self.paints
                .push((layer_id.to_string(), name.to_string(), value));
            Ok(())
        }

        fn set_fog(&mut self, _fog: Fog) {}

        fn set_terrain(&mut self, _terrain: Terrain) -> trackcam::Result<()> {
            Ok(())
        }

        fn free_camera_options(&self) -> FreeCameraOptions {
            self.camera
        }

        fn set_free_camera_options(&mut self, options: FreeCameraOptions) {
            self.camera = options;
            self.cameras.push(options);
        }
    }

    /// Scheduler that only counts requests
    #[derive(Default)]
    struct ManualScheduler {
        pending: usize,
    }

    impl FrameScheduler for ManualScheduler {
        fn schedule_next_tick(&mut self) {
            self.pending += 1;
        }
    }

    fn track() -> Arc<Track> {
        Arc::new(
            Track::new(vec![
                LngLat::new(6.13, 45.90),
                LngLat::new(6.20, 45.95),
                LngLat::new(6.35, 45.92),
                LngLat::new(6.50, 45.80),
            ])
            .unwrap(),
        )
    }

    fn options(smooth: bool) -> AnimatorOptions {
        AnimatorOptions {
            duration_ms: 1000.0,
            smoothing: Smoothing::from_flag(smooth, 0.95),
            ..AnimatorOptions::default()
        }
    }

    /// Every drawn frame requests exactly one more; the final one none
    #[test]
    fn test_one_request_per_drawn_frame() {
        let (mut animator, _handle) = PathAnimator::new(track(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        animator.start(&mut scheduler);
        assert_eq!(scheduler.pending, 1);

        let mut now = 0.0;
        let mut drawn = 0;
        while scheduler.pending > 0 {
            scheduler.pending -= 1;
            if let FrameOutcome::Continue(_) = animator.on_tick(now, &mut engine, &mut scheduler).unwrap() {
                drawn += 1;
            }
            now += 100.0;
        }

        // 0, 100, ..., 1000 are drawn; 1100 finishes
        assert_eq!(drawn, 11);
        assert_eq!(engine.cameras.len(), 11);
        assert_eq!(engine.paints.len(), 11);
        assert!(animator.is_done());
    }

    /// The animator only touches the track layer's line gradient
    #[test]
    fn test_paint_updates_target_line_gradient() {
        let (mut animator, _handle) = PathAnimator::new(track(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        animator.on_tick(0.0, &mut engine, &mut scheduler).unwrap();
        animator.on_tick(400.0, &mut engine, &mut scheduler).unwrap();

        for (layer, name, _) in &engine.paints {
            assert_eq!(layer, TRACK_LAYER_ID);
            assert_eq!(name, LINE_GRADIENT);
        }
        match &engine.paints[1].2 {
            PaintValue::Gradient(gradient) => {
                assert_eq!(gradient.stops.len(), 1);
                assert!((gradient.stops[0].0 - 0.4).abs() < 1e-12);
            }
            other => panic!("unexpected paint value {:?}", other),
        }
    }

    /// Bearing follows start - 400 * phase at 0, 0.5 and 1
    #[test]
    fn test_bearing_schedule() {
        let (mut animator, _handle) = PathAnimator::new(track(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        let mut bearings = Vec::new();
        for now in [0.0, 500.0, 1000.0] {
            if let FrameOutcome::Continue(sample) = animator.on_tick(now, &mut engine, &mut scheduler).unwrap() {
                bearings.push(sample.bearing);
            }
        }
        assert_eq!(bearings, vec![0.0, -200.0, -400.0]);

        // The engine sees the wrapped value
        assert!((engine.cameras[1].bearing() - 160.0).abs() < 1e-9);
        assert!((engine.cameras[2].bearing() - 320.0).abs() < 1e-9);
    }

    /// Raw frames match the corrector applied to the sampled target alone
    #[test]
    fn test_raw_camera_matches_corrector() {
        let track = track();
        let (mut animator, _handle) = PathAnimator::new(track.clone(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        animator.on_tick(0.0, &mut engine, &mut scheduler).unwrap();
        let FrameOutcome::Continue(sample) = animator.on_tick(300.0, &mut engine, &mut scheduler).unwrap() else {
            panic!("frame should be drawn");
        };

        let expected = compute_camera_position(None, 50.0, sample.bearing, sample.target, 8000.0, false);
        assert_eq!(sample.camera_position, expected);
        assert_eq!(sample.target, track.along_fraction(0.3));

        let anchor = engine.camera.ground_anchor().unwrap();
        assert!((anchor.lng - expected.lng).abs() < 1e-9);
        assert!((anchor.lat - expected.lat).abs() < 1e-9);
    }

    /// The smoothed camera ends up behind the raw one
    #[test]
    fn test_smoothed_camera_trails_raw() {
        let (mut raw, _) = PathAnimator::new(track(), options(false));
        let (mut smooth, _) = PathAnimator::new(track(), options(true));
        let mut raw_engine = RecordingEngine::default();
        let mut smooth_engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        let first = LngLat::new(6.13, 45.90);
        for now in (0..=10).map(|i| i as f64 * 100.0) {
            raw.on_tick(now, &mut raw_engine, &mut scheduler).unwrap();
            smooth.on_tick(now, &mut smooth_engine, &mut scheduler).unwrap();
        }

        let raw_anchor = raw_engine.camera.ground_anchor().unwrap();
        let smooth_anchor = smooth_engine.camera.ground_anchor().unwrap();
        // The raw camera has followed the track eastward much further
        assert!(raw_anchor.lng - first.lng > smooth_anchor.lng - first.lng);
    }

    /// The handle stays pending until a frame lands past the end
    #[test]
    fn test_completion_waits_for_phase_past_one() {
        let (mut animator, mut handle) = PathAnimator::new(track(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        for now in [0.0, 250.0, 999.0, 1000.0] {
            animator.on_tick(now, &mut engine, &mut scheduler).unwrap();
            assert!(!handle.is_done());
        }

        animator.on_tick(1000.5, &mut engine, &mut scheduler).unwrap();
        let report = handle.try_report().cloned().unwrap();
        assert_eq!(report.frames, 4);
        assert!(report.final_camera_position.is_some());
    }

    /// Start times latch on the first frame, not on construction
    #[test]
    fn test_start_time_latches_on_first_frame() {
        let (mut animator, _handle) = PathAnimator::new(track(), options(false));
        let mut engine = RecordingEngine::default();
        let mut scheduler = ManualScheduler::default();

        assert_eq!(animator.phase_at(123.0), 0.0);
        animator.on_tick(5_000.0, &mut engine, &mut scheduler).unwrap();
        assert_eq!(animator.state().start_time, Some(5_000.0));
        assert!((animator.phase_at(5_500.0) - 0.5).abs() < 1e-12);
    }
}
