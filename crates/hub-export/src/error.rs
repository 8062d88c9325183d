//! Error types for export

use hub_model::DocumentKind;
use std::path::PathBuf;

/// Rendering errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// The template names a section but none was given
    #[error("{kind} export requires a non-empty section title")]
    MissingSectionTitle { kind: DocumentKind },
}

/// Failures of the download capability.
///
/// These never reach application state; the engine logs and drops them.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Filename would escape the download location
    #[error("invalid download filename: {0:?}")]
    InvalidFilename(String),

    /// Writing the payload failed
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Platform refused the download
    #[error("download rejected: {0}")]
    Rejected(String),
}
