//! Project serialization: `ProjectData` to JSON text.
//!
//! The editing core keeps projects in memory; the host decides where the
//! text goes.

use tracing::debug;

use crate::error::ProjectResult;
use crate::types::ProjectData;

/// Serialize a project to a pretty-printed JSON string.
pub fn to_json_string(project: &ProjectData) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(project)?;
    debug!(
        project_name = %project.name,
        elements = project.elements.len(),
        json_len = json.len(),
        "Serialized project to JSON"
    );
    Ok(json)
}

/// Serialize a project to a compact (non-pretty) JSON string.
pub fn to_json_string_compact(project: &ProjectData) -> ProjectResult<String> {
    let json = serde_json::to_string(project)?;
    debug!(
        project_name = %project.name,
        json_len = json.len(),
        "Serialized project to compact JSON"
    );
    Ok(json)
}
