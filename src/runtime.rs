//! Frame plumbing between hosts and animators
//!
//! Animators ask for frames through [`FrameScheduler`]. Hosts keep one
//! [`FrameRequest`] per animator and answer pending requests with a
//! timestamp on their next frame: the egui app on each repaint, the
//! headless runner on each tokio interval tick.

use crate::traits::FrameScheduler;

/// A pending one-shot frame request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRequest {
    requested: bool,
}

impl FrameRequest {
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consumes the request, returning whether there was one
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for FrameRequest {
    fn schedule_next_tick(&mut self) {
        self.requested = true;
    }
}

/// Milliseconds since the clock was created, used as frame timestamps
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: instant::Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-runtime")]
pub use headless::run_headless;

#[cfg(feature = "tokio-runtime")]
mod headless {
    use super::FrameClock;
    use crate::comparison::Comparison;
    use std::time::Duration;

    /// Drives `comparison` at `fps` frames per second until both panes are
    /// done. Both maps are loaded on the first frame.
    pub async fn run_headless(comparison: &mut Comparison, fps: u32) -> u64 {
        let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let clock = FrameClock::new();
        comparison.load_all();

        let mut frames = 0u64;
        loop {
            interval.tick().await;
            frames += 1;
            if !comparison.on_frame(clock.now_ms()) {
                break;
            }
        }
        log::info!(
            "headless run finished after {} host frames ({:.0} ms)",
            frames,
            clock.now_ms()
        );
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_request_is_one_shot() {
        let mut frame = FrameRequest::default();
        assert!(!frame.take());
        frame.schedule_next_tick();
        frame.schedule_next_tick();
        assert!(frame.is_requested());
        assert!(frame.take());
        assert!(!frame.take());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_headless_run_completes() {
        use crate::{comparison::Comparison, core::config::ComparisonConfig, core::geo::LngLat, data::Track};
        use std::sync::Arc;

        let mut config = ComparisonConfig::default();
        config.animation.duration_ms = 50.0;
        let track = Track::new(vec![LngLat::new(6.0, 45.0), LngLat::new(6.05, 45.05)]).unwrap();
        let mut cmp = Comparison::new(config, Arc::new(track)).unwrap();

        let frames = run_headless(&mut cmp, 200).await;
        assert!(frames > 1);
        assert!(cmp.is_finished());
    }
}
