//! Every user action on the editor expressed as one enum.
//!
//! Hosts (keyboard handlers, toolbars, remote inputs) emit these and the
//! store applies them through [`EditorStore::dispatch`](crate::state::EditorStore::dispatch).

use rb_common::{ColorEffect, ElementId};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // Playback
    Play,
    Pause,
    Stop,
    TogglePlayPause,
    /// Move the playhead to the given time in milliseconds.
    Seek(f64),
    SetMaxTime(u64),

    // History
    Undo,
    Redo,

    // Elements
    Select(Option<ElementId>),
    Duplicate(ElementId),
    Remove(ElementId),
    /// Duplicate the selected element; no-op without a selection.
    DuplicateSelected,
    /// Remove the selected element; no-op without a selection.
    RemoveSelected,
    SetEffect { id: ElementId, effect: ColorEffect },
}
