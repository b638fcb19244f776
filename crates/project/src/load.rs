//! Project deserialization: `ProjectData` from JSON text, with validation.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{ProjectError, ProjectResult};
use crate::types::{ProjectData, CURRENT_VERSION};

/// Deserialize and validate a project from a JSON string.
pub fn from_json_string(json: &str) -> ProjectResult<ProjectData> {
    // Parse as a generic Value first so the version can be checked before
    // the typed decode reports confusing field errors.
    let value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(version) = value.get("version").and_then(|v| v.as_u64()) {
        if version > CURRENT_VERSION as u64 {
            return Err(ProjectError::UnsupportedVersion {
                version: version.min(u32::MAX as u64) as u32,
                supported: CURRENT_VERSION,
            });
        }
    }

    let project: ProjectData = serde_json::from_value(value)?;
    validate_project(&project)?;

    info!(
        project_name = %project.name,
        elements = project.elements.len(),
        "Project decoded"
    );
    Ok(project)
}

/// Validate the structural requirements of a project.
///
/// Elements that extend past the project duration are accepted with a
/// warning; the playhead simply never reaches their tail.
pub fn validate_project(project: &ProjectData) -> ProjectResult<()> {
    if project.name.trim().is_empty() {
        warn!(project_id = %project.id, "Project has empty name");
        return Err(ProjectError::InvalidProject {
            reason: "project name is empty".into(),
        });
    }

    let settings = &project.settings;
    if settings.width == 0 || settings.height == 0 {
        return Err(ProjectError::InvalidProject {
            reason: format!("invalid resolution: {}x{}", settings.width, settings.height),
        });
    }
    if settings.fps == 0 {
        return Err(ProjectError::InvalidProject {
            reason: "frame rate must be > 0".into(),
        });
    }
    if settings.duration.as_millis() == 0 {
        return Err(ProjectError::InvalidProject {
            reason: "duration must be > 0".into(),
        });
    }

    let mut seen = HashSet::with_capacity(project.elements.len());
    for element in &project.elements {
        if !seen.insert(element.id.as_str()) {
            return Err(ProjectError::InvalidProject {
                reason: format!("duplicate element id: {}", element.id),
            });
        }
        element
            .validate()
            .map_err(|e| ProjectError::InvalidProject {
                reason: format!("element {}: {e}", element.id),
            })?;
    }

    let overhang = project.elements_past_end();
    if overhang > 0 {
        warn!(
            project_name = %project.name,
            overhang,
            duration = %settings.duration,
            "Elements extend past the project duration"
        );
    }

    debug!(project_name = %project.name, "Project validated");
    Ok(())
}
