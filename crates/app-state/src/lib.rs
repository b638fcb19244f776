//! `rb-app-state` -- Editor state for the Reelboard editing core.
//!
//! This crate provides:
//!
//! - **`TimelineClock`**: playhead, play/pause/stop, seek, per-frame ticks and frame-index math.
//! - **`FrameTicker`**: turns host frame instants into clamped elapsed milliseconds.
//! - **`HistoryStack`**: cursor-based undo/redo over `HistorySnapshot`s, with gesture batching.
//! - **`EditorStore`**: the central container tying elements, selection, clock, history and project together.
//! - **`EditorCommand`** and shortcut resolution for hosts that map input to actions.
//! - **`CanvasViewport`**: fitting and zooming the canvas inside its container.
//! - **`SharedEditor`**: `Arc<Mutex<EditorStore>>` handle for multi-threaded hosts.
//!
//! # Architecture
//!
//! ```text
//! EditorStore (central state)
//! ├── elements: Vec<EditorElement>   (draw order)
//! ├── selected: Option<ElementId>
//! ├── clock: TimelineClock           (transport + playhead)
//! ├── history: HistoryStack          (snapshots + cursor)
//! ├── viewport: CanvasViewport
//! ├── project: Option<ProjectData>   (metadata, settings)
//! └── scene: Option<Box<dyn SceneSync>>
//! ```

pub mod clock;
pub mod commands;
pub mod error;
pub mod frame;
pub mod history;
pub mod scene;
pub mod shared;
pub mod shortcuts;
pub mod snapshot;
pub mod state;
pub mod viewport;

// Re-export primary types at crate root for convenience.
pub use clock::{visible_elements_at, TickOutcome, TimelineClock};
pub use commands::EditorCommand;
pub use error::{StoreError, StoreResult};
pub use frame::FrameTicker;
pub use history::{HistoryEntry, HistoryStack};
pub use scene::{RecordingScene, SceneSync};
pub use shared::SharedEditor;
pub use shortcuts::{resolve_shortcut, Key, KeyChord, ShortcutContext};
pub use snapshot::HistorySnapshot;
pub use state::{EditorStore, ElementUpdate, MediaLibrary, MenuOption};
pub use viewport::{CanvasSize, CanvasViewport};
