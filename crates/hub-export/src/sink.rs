//! Download capability
//!
//! Offering a file to the user is a platform facility (a browser save
//! dialog, a downloads folder). The engine only depends on the
//! [`DownloadSink`] trait; [`DirectorySink`] is the filesystem adapter
//! used by the command-line front end.

use crate::error::DownloadError;
use std::fs;
use std::path::{Path, PathBuf};

/// Media type of every exported document
pub const TEXT_MEDIA_TYPE: &str = "text/plain;charset=utf-8";

/// A named payload to offer to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name
    pub filename: String,
    /// MIME type with charset
    pub media_type: &'static str,
    /// UTF-8 encoded content
    pub payload: Vec<u8>,
}

impl Download {
    /// Plain-text download
    #[must_use]
    pub fn text(filename: impl Into<String>, content: &str) -> Self {
        Self {
            filename: filename.into(),
            media_type: TEXT_MEDIA_TYPE,
            payload: content.as_bytes().to_vec(),
        }
    }
}

/// Platform facility that offers a file to the user
#[cfg_attr(test, mockall::automock)]
pub trait DownloadSink: Send + Sync {
    /// Offer the download.
    ///
    /// # Errors
    /// Returns error if the platform could not deliver the file
    fn offer(&self, download: &Download) -> Result<(), DownloadError>;
}

/// Writes downloads into a directory, one file per download
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`, created on first download
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Download directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn offer(&self, download: &Download) -> Result<(), DownloadError> {
        let name = download.filename.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(DownloadError::InvalidFilename(download.filename.clone()));
        }

        fs::create_dir_all(&self.dir).map_err(|source| DownloadError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(name);
        fs::write(&path, &download.payload).map_err(|source| DownloadError::Write { path, source })
    }
}
