//! `rb-project` -- In-memory project data for the Reelboard editing core.
//!
//! This crate defines the project document and its JSON interchange format:
//!
//! - **Types**: `ProjectData`, `ProjectSettings`, `ProjectSettingsOverrides`
//! - **Encode**: `to_json_string`, `to_json_string_compact`
//! - **Decode**: `from_json_string` (version check + structural validation)
//!
//! Nothing here touches the filesystem; storing the JSON is the host's job.
//!
//! # Usage
//!
//! ```rust
//! use rb_project::{from_json_string, to_json_string, ProjectData, ProjectSettings};
//!
//! let project = ProjectData::new("My Project", ProjectSettings::default());
//! let json = to_json_string(&project).unwrap();
//! let loaded = from_json_string(&json).unwrap();
//! assert_eq!(loaded.name, "My Project");
//! ```

pub mod error;
pub mod load;
pub mod save;
pub mod types;

// Re-export primary API at crate root
pub use error::{ProjectError, ProjectResult};
pub use load::{from_json_string, validate_project};
pub use save::{to_json_string, to_json_string_compact};
pub use types::{ProjectData, ProjectSettings, ProjectSettingsOverrides, CURRENT_VERSION};
