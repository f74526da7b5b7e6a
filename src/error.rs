// src/error.rs
use dockey_keygen::{FieldPathError, KeygenError};
use thiserror::Error;

/// Errors raised while configuring or running key assignment.
#[derive(Error, Debug)]
pub enum DockeyError {
    #[error(transparent)]
    Keygen(#[from] KeygenError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read key config from '{1}': {0}")]
    ConfigFile(#[source] std::io::Error, String),
}

impl From<FieldPathError> for DockeyError {
    fn from(e: FieldPathError) -> Self {
        DockeyError::Keygen(KeygenError::FieldPath(e))
    }
}

impl DockeyError {
    /// True for per-document failures that should not stop a batch.
    pub fn is_result_error(&self) -> bool {
        matches!(self, DockeyError::Keygen(e) if e.is_result_error())
    }
}
