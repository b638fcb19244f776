//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur while encoding or decoding project data.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Project was written by a newer format than this build understands.
    #[error("Unsupported project version: {version} (newest supported: {supported})")]
    UnsupportedVersion { version: u32, supported: u32 },

    /// Project data violates a structural requirement.
    #[error("Invalid project: {reason}")]
    InvalidProject { reason: String },
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProjectError::UnsupportedVersion {
            version: 9,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('9') && msg.contains('1'));

        let err = ProjectError::InvalidProject {
            reason: "missing name".into(),
        };
        assert!(err.to_string().contains("missing name"));
    }

    #[test]
    fn json_error_conversion() {
        let result: Result<crate::types::ProjectData, _> = serde_json::from_str("not json");
        let proj_err: ProjectError = result.unwrap_err().into();
        assert!(matches!(proj_err, ProjectError::Json(_)));
    }
}
