//! Timeline playback clock: play/pause/stop, seeking, per-frame advancement
//! and frame-index conversion.

use rb_common::{EditorConfig, EditorElement, EditorError, EditorResult, PlayAtEndPolicy, TimeMs};

/// Result of a single [`TimelineClock::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is not playing; nothing changed.
    Idle,
    /// The delta was NaN or negative and was ignored.
    Rejected,
    /// The playhead moved forward and playback continues.
    Advanced,
    /// The playhead hit the end of the timeline and playback stopped there.
    ReachedEnd,
}

/// Playhead position and transport state for the timeline.
///
/// The cursor is kept in whole milliseconds and always satisfies
/// `0 <= current_time <= max_time`. Fractional milliseconds from
/// [`tick`](Self::tick) are carried to the next tick, so a 60 Hz host
/// (16.67 ms deltas) advances without drift.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineClock {
    current_time: TimeMs,
    max_time: TimeMs,
    playing: bool,
    fps: u32,
    play_at_end: PlayAtEndPolicy,
    carry_ms: f64,
}

impl TimelineClock {
    /// Create a stopped clock at time 0.
    pub fn new(max_time_ms: u64, fps: u32) -> EditorResult<Self> {
        if max_time_ms == 0 {
            return Err(EditorError::InvalidDuration(max_time_ms));
        }
        if fps == 0 {
            return Err(EditorError::InvalidFps(fps));
        }
        Ok(Self {
            current_time: TimeMs::ZERO,
            max_time: TimeMs(max_time_ms),
            playing: false,
            fps,
            play_at_end: PlayAtEndPolicy::default(),
            carry_ms: 0.0,
        })
    }

    pub fn from_config(config: &EditorConfig) -> EditorResult<Self> {
        Ok(Self::new(config.initial_max_time_ms, config.fps)?.with_play_at_end(config.play_at_end))
    }

    pub fn with_play_at_end(mut self, policy: PlayAtEndPolicy) -> Self {
        self.play_at_end = policy;
        self
    }

    pub fn current_time(&self) -> TimeMs {
        self.current_time
    }

    pub fn current_time_ms(&self) -> u64 {
        self.current_time.as_millis()
    }

    pub fn max_time(&self) -> TimeMs {
        self.max_time
    }

    pub fn max_time_ms(&self) -> u64 {
        self.max_time.as_millis()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn play_at_end(&self) -> PlayAtEndPolicy {
        self.play_at_end
    }

    /// Whether the playhead sits at the end of the timeline.
    pub fn is_at_end(&self) -> bool {
        self.current_time >= self.max_time
    }

    /// Playhead position as a fraction of the timeline, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        self.current_time.as_millis() as f64 / self.max_time.as_millis() as f64
    }

    /// Start or resume playback. Returns whether the clock is playing after
    /// the call.
    ///
    /// At the end of the timeline the [`PlayAtEndPolicy`] decides: `Rewind`
    /// seeks to 0 first, `Ignore` leaves the clock stopped.
    pub fn play(&mut self) -> bool {
        if self.playing {
            return true;
        }
        if self.is_at_end() {
            match self.play_at_end {
                PlayAtEndPolicy::Rewind => {
                    self.current_time = TimeMs::ZERO;
                    self.carry_ms = 0.0;
                    tracing::debug!("Play at end of timeline, rewinding to start");
                }
                PlayAtEndPolicy::Ignore => {
                    tracing::debug!(time = %self.current_time, "Play ignored at end of timeline");
                    return false;
                }
            }
        }
        self.playing = true;
        tracing::debug!(time = %self.current_time, "Playback started");
        true
    }

    /// Pause playback at the current position.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            tracing::debug!(time = %self.current_time, "Playback paused");
        }
    }

    /// Stop playback and reset the playhead to 0.
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_time = TimeMs::ZERO;
        self.carry_ms = 0.0;
        tracing::debug!("Playback stopped");
    }

    /// Toggle between playing and paused. Returns whether the clock is
    /// playing afterwards.
    pub fn toggle_play_pause(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Move the playhead to `time_ms`, clamped to `[0, max_time]` and floored
    /// to whole milliseconds. Works in any transport state and is cheap
    /// enough to call on every pointer move of a scrub gesture.
    ///
    /// A NaN target is rejected and leaves the playhead where it was.
    /// Returns the resulting playhead position.
    pub fn seek_to(&mut self, time_ms: f64) -> TimeMs {
        if time_ms.is_nan() {
            tracing::warn!("Seek to NaN ignored");
            return self.current_time;
        }
        let clamped = time_ms.clamp(0.0, self.max_time.as_millis() as f64);
        self.set_position(TimeMs(clamped.floor() as u64));
        self.current_time
    }

    /// Integer form of [`seek_to`](Self::seek_to).
    pub fn seek(&mut self, time: TimeMs) -> TimeMs {
        self.set_position(time.clamp(TimeMs::ZERO, self.max_time));
        self.current_time
    }

    fn set_position(&mut self, time: TimeMs) {
        self.current_time = time;
        self.carry_ms = 0.0;
        tracing::trace!(time = %self.current_time, "Seeked");
    }

    /// Advance the playhead by `elapsed_ms` of wall-clock time.
    ///
    /// Only effective while playing. NaN or negative deltas are rejected.
    /// Reaching the end clamps the playhead to `max_time` and stops playback
    /// without rewinding (unlike [`stop`](Self::stop)).
    ///
    /// The delta is applied as given; clamping oversized gaps from a
    /// suspended host is the frame driver's job (see `FrameTicker`).
    pub fn tick(&mut self, elapsed_ms: f64) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }
        if elapsed_ms.is_nan() || elapsed_ms < 0.0 {
            tracing::warn!(elapsed_ms, "Rejected invalid tick delta");
            return TickOutcome::Rejected;
        }

        let total = self.carry_ms + elapsed_ms;
        let whole = total.floor();
        let next = self.current_time.as_millis().saturating_add(whole as u64);

        if next >= self.max_time.as_millis() {
            self.current_time = self.max_time;
            self.carry_ms = 0.0;
            self.playing = false;
            tracing::debug!(time = %self.current_time, "Reached end of timeline");
            return TickOutcome::ReachedEnd;
        }

        self.carry_ms = total - whole;
        self.current_time = TimeMs(next);
        TickOutcome::Advanced
    }

    /// Change the timeline duration. The playhead is pulled back inside the
    /// new bound; if that puts it at the end, playback stops.
    pub fn set_max_time_ms(&mut self, max_time_ms: u64) -> EditorResult<()> {
        if max_time_ms == 0 {
            return Err(EditorError::InvalidDuration(max_time_ms));
        }
        self.max_time = TimeMs(max_time_ms);
        if self.current_time >= self.max_time {
            self.current_time = self.max_time;
            self.carry_ms = 0.0;
            if self.playing {
                self.playing = false;
                tracing::debug!("Duration shortened past playhead, playback stopped");
            }
        }
        tracing::debug!(max_time = %self.max_time, "Timeline duration set");
        Ok(())
    }

    pub fn set_fps(&mut self, fps: u32) -> EditorResult<()> {
        if fps == 0 {
            return Err(EditorError::InvalidFps(fps));
        }
        self.fps = fps;
        tracing::debug!(fps, "Timeline fps set");
        Ok(())
    }

    pub fn set_play_at_end(&mut self, policy: PlayAtEndPolicy) {
        self.play_at_end = policy;
    }

    /// Frame index containing `time`: `floor(time / 1000 * fps)`.
    ///
    /// Not an exact inverse of [`time_at_frame_index`](Self::time_at_frame_index):
    /// frame boundaries rarely land on whole milliseconds, so a round trip
    /// through milliseconds can drift by one frame.
    pub fn frame_index_at(&self, time: TimeMs) -> u64 {
        (time.as_millis() as u128 * self.fps as u128 / 1000) as u64
    }

    /// Start time of `frame` in (fractional) milliseconds: `frame / fps * 1000`.
    pub fn time_at_frame_index(&self, frame: u64) -> f64 {
        frame as f64 / self.fps as f64 * 1000.0
    }

    /// Frame index under the playhead.
    pub fn current_frame(&self) -> u64 {
        self.frame_index_at(self.current_time)
    }

    /// Elements visible under the playhead (see [`visible_elements_at`]).
    pub fn visible_elements<'a>(&self, elements: &'a [EditorElement]) -> Vec<&'a EditorElement> {
        visible_elements_at(self.current_time, elements)
    }
}

/// Elements whose time frame contains `time` (inclusive at both ends), in
/// their original order.
pub fn visible_elements_at(time: TimeMs, elements: &[EditorElement]) -> Vec<&EditorElement> {
    elements.iter().filter(|e| e.is_visible_at(time)).collect()
}
