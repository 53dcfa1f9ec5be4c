//! Side-by-side comparison of the raw and smoothed camera paths
//!
//! A [`Comparison`] owns two panes built from the same config and track.
//! Each pane waits for its map's load event, dresses the scene, adds the
//! path layer and then runs its own [`PathAnimator`]. The host forwards
//! frame timestamps through [`Comparison::on_frame`].

use std::sync::Arc;

use crate::{
    animation::animator::{AnimationHandle, AnimatorOptions, FrameOutcome, FrameSample, PathAnimator},
    core::{
        builder::MapBuilder,
        config::ComparisonConfig,
        map::{MapEvent, SceneMap},
    },
    data::track::Track,
    layers::scene::{add_3d, add_path_source_and_layer},
    runtime::FrameRequest,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn container(&self) -> &'static str {
        match self {
            Side::Left => "left-map",
            Side::Right => "right-map",
        }
    }

    /// The left pane runs raw, the right one smoothed
    pub fn smooth(&self) -> bool {
        matches!(self, Side::Right)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "Raw",
            Side::Right => "Smoothed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaneStatus {
    /// Map created, load event not seen yet
    Waiting,
    Animating,
    Finished,
    /// The engine rejected a call; the pane's animation was dropped
    Failed(String),
}

/// One map with its animator
pub struct Pane {
    side: Side,
    map: SceneMap,
    animator: Option<PathAnimator>,
    handle: Option<AnimationHandle>,
    frame: FrameRequest,
    last_sample: Option<FrameSample>,
    status: PaneStatus,
}

impl Pane {
    fn new(side: Side, map: SceneMap) -> Self {
        Self {
            side,
            map,
            animator: None,
            handle: None,
            frame: FrameRequest::default(),
            last_sample: None,
            status: PaneStatus::Waiting,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn label(&self) -> &'static str {
        self.side.label()
    }

    pub fn map(&self) -> &SceneMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut SceneMap {
        &mut self.map
    }

    pub fn status(&self) -> &PaneStatus {
        &self.status
    }

    pub fn last_sample(&self) -> Option<&FrameSample> {
        self.last_sample.as_ref()
    }

    /// True while the pane can still produce frames
    pub fn is_active(&self) -> bool {
        matches!(self.status, PaneStatus::Waiting | PaneStatus::Animating)
    }

    fn on_load(&mut self, config: &ComparisonConfig, track: &Arc<Track>) -> Result<()> {
        log::debug!("{}: style loaded, adding scene", self.side.container());
        add_3d(&mut self.map, &config.scene)?;
        add_path_source_and_layer(&mut self.map, track, &config.scene)?;

        let options = AnimatorOptions::from_config(config, self.side.smooth());
        let (animator, handle) = PathAnimator::new(Arc::clone(track), options);
        animator.start(&mut self.frame);
        self.animator = Some(animator);
        self.handle = Some(handle);
        self.status = PaneStatus::Animating;
        Ok(())
    }

    fn tick(&mut self, now: f64) -> Result<()> {
        if !self.frame.take() {
            return Ok(());
        }
        let Some(animator) = self.animator.as_mut() else {
            return Ok(());
        };
        match animator.on_tick(now, &mut self.map, &mut self.frame)? {
            FrameOutcome::Continue(sample) => self.last_sample = Some(sample),
            FrameOutcome::Finished => {
                self.status = PaneStatus::Finished;
                self.animator = None;
            }
        }
        Ok(())
    }

    fn fail(&mut self, err: crate::TrackcamError) {
        log::error!("{}: animation dropped: {}", self.side.container(), err);
        self.animator = None;
        self.status = PaneStatus::Failed(err.to_string());
    }
}

/// The two-map comparison
pub struct Comparison {
    config: ComparisonConfig,
    track: Arc<Track>,
    panes: [Pane; 2],
}

impl Comparison {
    pub fn new(config: ComparisonConfig, track: Arc<Track>) -> Result<Self> {
        config.validate()?;
        let center = track.first();
        let build = |side: Side| {
            MapBuilder::new(side.container())
                .with_style_config(&config.map)
                .with_center(center)
                .with_access_token(config.access_token.clone())
                .build()
        };
        let panes = [
            Pane::new(Side::Left, build(Side::Left)),
            Pane::new(Side::Right, build(Side::Right)),
        ];
        log::debug!(
            "comparison created around {:?} with {} track vertices",
            center,
            track.len()
        );
        Ok(Self {
            config,
            track,
            panes,
        })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane(&self, side: Side) -> &Pane {
        &self.panes[side as usize]
    }

    pub fn pane_mut(&mut self, side: Side) -> &mut Pane {
        &mut self.panes[side as usize]
    }

    /// Fires the load event of both maps
    pub fn load_all(&mut self) {
        for pane in &mut self.panes {
            pane.map.fire_load();
        }
    }

    /// Completion handle of a pane's animation. Available once the pane has
    /// loaded, and only once.
    pub fn take_handle(&mut self, side: Side) -> Option<AnimationHandle> {
        self.pane_mut(side).handle.take()
    }

    /// Handles one host frame. Returns whether any pane still wants frames.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        let Self {
            config,
            track,
            panes,
        } = self;

        for pane in panes.iter_mut() {
            for event in pane.map.take_events() {
                match event {
                    MapEvent::Load => {
                        if let Err(err) = pane.on_load(config, track) {
                            pane.fail(err);
                        }
                    }
                }
            }
            if let Err(err) = pane.tick(now_ms) {
                pane.fail(err);
            }
        }

        !self.is_finished()
    }

    /// True once neither pane can produce more frames
    pub fn is_finished(&self) -> bool {
        self.panes.iter().all(|pane| !pane.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{constants::TRACK_LAYER_ID, geo::LngLat};

    fn comparison(duration_ms: f64) -> Comparison {
        let mut config = ComparisonConfig::default();
        config.animation.duration_ms = duration_ms;
        let track = Track::new(vec![
            LngLat::new(6.0, 45.0),
            LngLat::new(6.1, 45.1),
            LngLat::new(6.2, 45.1),
        ])
        .unwrap();
        Comparison::new(config, Arc::new(track)).unwrap()
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let mut config = ComparisonConfig::default();
        config.animation.duration_ms = -5.0;
        let track = Track::new(vec![LngLat::new(6.0, 45.0), LngLat::new(6.1, 45.1)]).unwrap();
        let result = Comparison::new(config, Arc::new(track));
        assert!(matches!(result, Err(crate::TrackcamError::InvalidConfig(_))));
    }

    #[test]
    fn test_panes_share_view() {
        let cmp = comparison(1000.0);
        let left = cmp.pane(Side::Left).map().options();
        let right = cmp.pane(Side::Right).map().options();
        assert_eq!(left.container, "left-map");
        assert_eq!(right.container, "right-map");
        assert_eq!(left.center, LngLat::new(6.0, 45.0));
        assert_eq!(left.center, right.center);
        assert_eq!(left.style, right.style);
    }

    #[test]
    fn test_nothing_happens_before_load() {
        let mut cmp = comparison(1000.0);
        assert!(cmp.on_frame(0.0));
        assert_eq!(cmp.pane(Side::Left).status(), &PaneStatus::Waiting);
        assert!(cmp.pane(Side::Left).map().layers().is_empty());
    }

    #[test]
    fn test_load_wires_scene_and_starts_animation() {
        let mut cmp = comparison(1000.0);
        cmp.pane_mut(Side::Left).map_mut().fire_load();

        cmp.on_frame(0.0);
        let left = cmp.pane(Side::Left);
        assert_eq!(left.status(), &PaneStatus::Animating);
        assert!(left.map().line_layer(TRACK_LAYER_ID).is_some());
        assert_eq!(left.last_sample().unwrap().phase, 0.0);
        assert_eq!(cmp.pane(Side::Right).status(), &PaneStatus::Waiting);
    }

    #[test]
    fn test_runs_to_completion() {
        let mut cmp = comparison(100.0);
        cmp.load_all();
        let mut left = None;
        let mut now = 0.0;
        while cmp.on_frame(now) {
            if left.is_none() {
                left = cmp.take_handle(Side::Left);
            }
            now += 10.0;
        }
        assert!(cmp.panes().iter().all(|p| p.status() == &PaneStatus::Finished));
        let report = left.unwrap().try_report().cloned().unwrap();
        assert_eq!(report.frames, 11);
    }

    #[test]
    fn test_smoothed_pane_lags_behind_raw() {
        let mut cmp = comparison(1000.0);
        cmp.load_all();
        cmp.on_frame(0.0);
        cmp.on_frame(500.0);

        let raw = cmp.pane(Side::Left).last_sample().unwrap();
        let smooth = cmp.pane(Side::Right).last_sample().unwrap();
        assert_eq!(raw.target, smooth.target);
        assert_ne!(raw.camera_position, smooth.camera_position);
    }

    #[test]
    fn test_style_error_fails_only_that_pane() {
        let mut cmp = comparison(1000.0);
        // A layer already occupying the track id makes the path layer fail
        {
            let pane = cmp.pane_mut(Side::Left);
            let track = Track::new(vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)]).unwrap();
            add_path_source_and_layer(pane.map_mut(), &track, &Default::default()).unwrap();
        }
        cmp.load_all();
        assert!(cmp.on_frame(0.0));
        assert!(matches!(cmp.pane(Side::Left).status(), PaneStatus::Failed(_)));
        assert_eq!(cmp.pane(Side::Right).status(), &PaneStatus::Animating);
    }
}
