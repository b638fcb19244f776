//! `rb-common` -- Shared types, errors and configuration for the Reelboard
//! editing core.
//!
//! This crate is the foundation the other crates depend on:
//!
//! - **Types**: `TimeMs`, `ElementId`, `Resolution`, `RenderHandle` (newtypes for safety)
//! - **Elements**: `EditorElement`, `ElementKind`, `Placement`, `TimeFrame`
//! - **Effects**: `ColorEffect` (data only, rendering lives elsewhere)
//! - **Export**: `ExportSettings`, `VideoFormat`, `AspectRatio` presets
//! - **Media**: `MediaKind` detection from file names
//! - **Errors**: `EditorError` (thiserror-based)
//! - **Config**: `EditorConfig`, `CanvasConfig`, `PlayAtEndPolicy`

pub mod config;
pub mod effect;
pub mod element;
pub mod error;
pub mod export;
pub mod media;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CanvasConfig, EditorConfig, PlayAtEndPolicy};
pub use effect::ColorEffect;
pub use element::{
    AudioProperties, EditorElement, ElementKind, ImageProperties, Placement, TextProperties,
    TimeFrame, VideoProperties,
};
pub use error::{EditorError, EditorResult};
pub use export::{
    AspectRatio, ExportQuality, ExportSettings, ExportSettingsUpdate, ResolutionPreset,
    VideoFormat,
};
pub use media::{file_extension, MediaKind};
pub use types::{ElementId, RenderHandle, Resolution, TimeMs};
