//! Store-level error type: editor errors plus project decoding errors.

use rb_common::EditorError;
use rb_project::ProjectError;
use thiserror::Error;

/// Errors from [`EditorStore`](crate::state::EditorStore) operations that
/// touch project data.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

pub type StoreResult<T> = Result<T, StoreError>;
