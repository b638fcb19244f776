//! Configuration structs for the editor store, playback clock and canvas.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// What `play()` does when the playhead already sits at the end of the
/// timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayAtEndPolicy {
    /// Seek back to 0, then start playing.
    #[default]
    Rewind,
    /// Stay stopped at the end.
    Ignore,
}

/// Canvas sizing limits used by the viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Project (design) width in pixels.
    pub width: u32,
    /// Project (design) height in pixels.
    pub height: u32,
    /// Padding kept between the canvas and its container, per side.
    pub padding: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            padding: 40.0,
            min_scale: 0.1,
            max_scale: 2.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of snapshots kept by the undo history.
    pub max_history_size: usize,
    /// Timeline duration of a fresh project.
    pub initial_max_time_ms: u64,
    /// Project frame rate.
    pub fps: u32,
    /// Largest per-frame delta the frame ticker reports; longer gaps
    /// (backgrounded host, debugger pause) are clamped to this.
    pub max_tick_ms: u64,
    pub play_at_end: PlayAtEndPolicy,
    pub background_color: String,
    pub canvas: CanvasConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history_size: 50,
            initial_max_time_ms: 30_000,
            fps: 60,
            max_tick_ms: 250,
            play_at_end: PlayAtEndPolicy::Rewind,
            background_color: "#000000".to_string(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(
            max_history_size = config.max_history_size,
            fps = config.fps,
            max_time_ms = config.initial_max_time_ms,
            "Editor config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> EditorResult<()> {
        if self.max_history_size == 0 {
            return Err(EditorError::Config("max_history_size must be > 0".into()));
        }
        if self.initial_max_time_ms == 0 {
            return Err(EditorError::InvalidDuration(0));
        }
        if self.fps == 0 {
            return Err(EditorError::InvalidFps(0));
        }
        if self.max_tick_ms == 0 {
            return Err(EditorError::Config("max_tick_ms must be > 0".into()));
        }
        let canvas = &self.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(EditorError::Config(format!(
                "canvas size must be non-zero, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        if !(canvas.min_scale > 0.0 && canvas.min_scale <= canvas.max_scale) {
            return Err(EditorError::Config(format!(
                "canvas scale bounds invalid: min {} max {}",
                canvas.min_scale, canvas.max_scale
            )));
        }
        if canvas.padding < 0.0 {
            return Err(EditorError::Config("canvas padding must be >= 0".into()));
        }
        Ok(())
    }
}
