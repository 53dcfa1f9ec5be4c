//! Per-map flyover along the track
//!
//! A [`PathAnimator`] is a two-state machine (running, done) advanced by
//! host frames. Every frame it derives the phase from the elapsed time,
//! reveals the line up to that phase, rotates the bearing at a fixed rate,
//! corrects the camera anchor and hands the new free camera to the engine.
//! Completion is reported once through an [`AnimationHandle`].

use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::{
    animation::camera_path::{correct_camera_position, CameraPosition, Smoothing},
    core::{
        config::ComparisonConfig,
        constants::{LINE_GRADIENT, TRACK_LAYER_ID},
        geo::{LngLat, MercatorCoordinate},
    },
    data::track::Track,
    layers::{scene::line_cutoff, Color},
    traits::{FrameScheduler, MapEngine},
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorOptions {
    pub duration_ms: f64,
    pub start_bearing: f64,
    pub altitude: f64,
    pub pitch: f64,
    pub smoothing: Smoothing,
    /// Degrees of rotation per unit of phase
    pub bearing_rate: f64,
    /// Color of the revealed part of the line
    pub line_color: Color,
    pub layer_id: String,
}

impl AnimatorOptions {
    pub fn from_config(config: &ComparisonConfig, smooth: bool) -> Self {
        Self {
            duration_ms: config.animation.duration_ms,
            start_bearing: config.animation.start_bearing,
            altitude: config.animation.altitude,
            pitch: config.animation.pitch,
            smoothing: Smoothing::from_flag(smooth, config.smoothing.factor),
            bearing_rate: config.animation.bearing_rate,
            line_color: config.scene.track_color,
            layer_id: TRACK_LAYER_ID.to_string(),
        }
    }

    /// Bearing at `phase`. Not normalized: longer phases keep rotating.
    pub fn bearing_at(&self, phase: f64) -> f64 {
        self.start_bearing - phase * self.bearing_rate
    }
}

impl Default for AnimatorOptions {
    fn default() -> Self {
        Self::from_config(&ComparisonConfig::default(), false)
    }
}

/// State carried from one frame to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Timestamp of the first frame, latched on the first tick
    pub start_time: Option<f64>,
    pub previous_camera_position: Option<CameraPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorStatus {
    Running,
    Done,
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub phase: f64,
    pub bearing: f64,
    /// Point sampled on the track
    pub target: LngLat,
    pub camera_position: CameraPosition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// A frame was drawn and the next one requested
    Continue(FrameSample),
    /// The animation is over; no further frames are requested
    Finished,
}

/// Summary delivered through the completion handle
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationReport {
    pub frames: u64,
    pub final_camera_position: Option<CameraPosition>,
    pub elapsed_ms: f64,
}

/// Completion signal of one animation.
///
/// Resolves to `Some(report)` when the animation finishes and to `None`
/// when the animator was dropped before finishing.
#[derive(Debug)]
pub struct AnimationHandle {
    rx: oneshot::Receiver<AnimationReport>,
    report: Option<AnimationReport>,
    abandoned: bool,
}

impl AnimationHandle {
    /// Non-blocking check for completion
    pub fn try_report(&mut self) -> Option<&AnimationReport> {
        if self.report.is_none() && !self.abandoned {
            match self.rx.try_recv() {
                Ok(Some(report)) => self.report = Some(report),
                Ok(None) => {}
                Err(oneshot::Canceled) => self.abandoned = true,
            }
        }
        self.report.as_ref()
    }

    pub fn is_done(&mut self) -> bool {
        self.try_report().is_some()
    }

    /// True once the animator went away without finishing
    pub fn is_abandoned(&mut self) -> bool {
        self.try_report();
        self.abandoned
    }
}

impl Future for AnimationHandle {
    type Output = Option<AnimationReport>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(report) = &self.report {
            return Poll::Ready(Some(report.clone()));
        }
        if self.abandoned {
            return Poll::Ready(None);
        }
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(report)) => {
                self.report = Some(report.clone());
                Poll::Ready(Some(report))
            }
            Poll::Ready(Err(oneshot::Canceled)) => {
                self.abandoned = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Moves a free camera along a track, one frame at a time
pub struct PathAnimator {
    track: Arc<Track>,
    path_distance_km: f64,
    options: AnimatorOptions,
    state: AnimationState,
    status: AnimatorStatus,
    frames: u64,
    completion: Option<oneshot::Sender<AnimationReport>>,
}

impl PathAnimator {
    pub fn new(track: Arc<Track>, options: AnimatorOptions) -> (Self, AnimationHandle) {
        let (tx, rx) = oneshot::channel();
        let path_distance_km = track.length_km();
        let animator = Self {
            track,
            path_distance_km,
            options,
            state: AnimationState::default(),
            status: AnimatorStatus::Running,
            frames: 0,
            completion: Some(tx),
        };
        let handle = AnimationHandle {
            rx,
            report: None,
            abandoned: false,
        };
        (animator, handle)
    }

    /// Requests the first frame
    pub fn start<S: FrameScheduler + ?Sized>(&self, scheduler: &mut S) {
        log::info!(
            "starting flyover: {:.2} km over {} ms (smoothing: {:?})",
            self.path_distance_km,
            self.options.duration_ms,
            self.options.smoothing
        );
        scheduler.schedule_next_tick();
    }

    pub fn options(&self) -> &AnimatorOptions {
        &self.options
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn status(&self) -> AnimatorStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == AnimatorStatus::Done
    }

    /// Phase at `now`, or zero before the first frame
    pub fn phase_at(&self, now: f64) -> f64 {
        match self.state.start_time {
            Some(start) if self.options.duration_ms > 0.0 => (now - start) / self.options.duration_ms,
            Some(_) => f64::INFINITY,
            None => 0.0,
        }
    }

    /// Handles one host frame at timestamp `now` (milliseconds).
    ///
    /// Requests the next frame through `scheduler` unless the animation
    /// ends on this frame. Engine errors are returned as is; the animator
    /// keeps its state and requests nothing further.
    pub fn on_tick<E, S>(&mut self, now: f64, map: &mut E, scheduler: &mut S) -> Result<FrameOutcome>
    where
        E: MapEngine + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.status == AnimatorStatus::Done {
            return Ok(FrameOutcome::Finished);
        }

        let start_time = *self.state.start_time.get_or_insert(now);
        let phase = self.phase_at(now);

        if phase > 1.0 {
            self.finish(now - start_time);
            return Ok(FrameOutcome::Finished);
        }

        let target = self.track.along(self.path_distance_km * phase);
        let bearing = self.options.bearing_at(phase);

        let camera_position = correct_camera_position(
            self.state.previous_camera_position,
            self.options.pitch,
            bearing,
            target,
            self.options.altitude,
            self.options.smoothing,
        );
        self.state.previous_camera_position = Some(camera_position);

        map.set_paint_property(
            &self.options.layer_id,
            LINE_GRADIENT,
            line_cutoff(self.options.line_color, phase).into(),
        )?;

        let mut camera = map.free_camera_options();
        camera.set_pitch_bearing(self.options.pitch, bearing);
        camera.position = Some(MercatorCoordinate::from_lng_lat(
            camera_position,
            self.options.altitude,
        ));
        map.set_free_camera_options(camera);

        self.frames += 1;
        scheduler.schedule_next_tick();

        Ok(FrameOutcome::Continue(FrameSample {
            phase,
            bearing,
            target,
            camera_position,
        }))
    }

    fn finish(&mut self, elapsed_ms: f64) {
        self.status = AnimatorStatus::Done;
        log::info!(
            "flyover finished after {} frames ({:.0} ms)",
            self.frames,
            elapsed_ms
        );
        if let Some(tx) = self.completion.take() {
            let report = AnimationReport {
                frames: self.frames,
                final_camera_position: self.state.previous_camera_position,
                elapsed_ms,
            };
            // The receiver may already be gone; nobody is waiting then.
            let _ = tx.send(report);
        }
    }
}
