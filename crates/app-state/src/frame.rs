//! Host frame driver: turns per-frame `Instant`s into elapsed milliseconds
//! for [`TimelineClock::tick`](crate::clock::TimelineClock::tick).

use std::time::{Duration, Instant};

use rb_common::EditorConfig;

/// Measures the wall-clock gap between consecutive host frames.
///
/// The first frame after construction or [`reset`](Self::reset) yields 0.
/// Gaps longer than `max_delta` (a backgrounded tab, a debugger pause) are
/// clamped so the playhead does not jump.
#[derive(Clone, Debug)]
pub struct FrameTicker {
    last_frame: Option<Instant>,
    max_delta: Duration,
}

impl FrameTicker {
    pub fn new(max_delta_ms: u64) -> Self {
        Self {
            last_frame: None,
            max_delta: Duration::from_millis(max_delta_ms),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.max_tick_ms)
    }

    /// Elapsed milliseconds since the previous frame, clamped to `max_delta`.
    pub fn delta_ms(&mut self, now: Instant) -> f64 {
        let delta = match self.last_frame.replace(now) {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        if delta > self.max_delta {
            tracing::warn!(
                delta_ms = to_millis(delta),
                max_ms = to_millis(self.max_delta),
                "Clamped oversized frame delta"
            );
            return to_millis(self.max_delta);
        }
        to_millis(delta)
    }

    /// Forget the previous frame, so the next one starts from 0.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }
}

fn to_millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
