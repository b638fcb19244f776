//! Central error types for the editing core (thiserror-based).

use thiserror::Error;

use crate::types::{ElementId, TimeMs};

/// Errors raised at the editor's call boundaries.
///
/// These signal caller bugs or rejected input. Reaching the start or end of
/// the history, or seeking out of range, is not an error.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Invalid time frame: start {start:?} is after end {end:?}")]
    InvalidTimeFrame { start: TimeMs, end: TimeMs },

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Duplicate element id: {0}")]
    DuplicateElement(ElementId),

    #[error("Element {id} ({kind}) has no {property} property")]
    UnsupportedProperty {
        id: ElementId,
        kind: &'static str,
        property: &'static str,
    },

    #[error("Invalid timeline duration: {0} ms (must be > 0)")]
    InvalidDuration(u64),

    #[error("Invalid frame rate: {0} (must be > 0)")]
    InvalidFps(u32),

    #[error("Unsupported media file: {0}")]
    UnsupportedMedia(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Convenience Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
