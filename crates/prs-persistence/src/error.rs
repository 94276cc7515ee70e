//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints for the UI layer.

use std::path::PathBuf;

use prs_model::ModelError;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The catalog data file does not exist.
    #[error("catalog file not found: {path}")]
    FileMissing { path: PathBuf },

    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the catalog schema.
    #[error("malformed catalog file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Serialization of the configuration section failed.
    #[error("failed to serialize catalog data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reference resolution or cycle detection failed while building the
    /// object graph from the document.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileMissing { path } => {
                format!(
                    "The catalog file at {} could not be found. \
                    It may not have been synchronized yet.",
                    path.display()
                )
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Malformed { path, reason } => {
                format!(
                    "The file at {} is not a valid catalog file: {}",
                    path.display(),
                    reason
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the catalog data.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Model(err) => err.to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::FileMissing { .. } => Some(
                "Run the synchronization once, or check the data file path in the preferences."
                    .into(),
            ),
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Malformed { .. } => Some(
                "The file may have been edited by hand; restore it from the server copy.".into(),
            ),
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::Model(ModelError::UnresolvedMaterial { .. })
            | Self::Model(ModelError::UnresolvedConfiguration { .. }) => {
                Some("Fix the dangling reference in the catalog file and reload.".into())
            }
            Self::Model(ModelError::CyclicConfiguration { .. }) => {
                Some("Break the configuration cycle in the catalog file and reload.".into())
            }
            Self::Model(_) => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
