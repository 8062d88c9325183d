//! Workflow timing and file limits

use crate::error::ValidationError;
use hub_model::{FileKind, SelectedFile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default simulated upload time
pub const DEFAULT_UPLOAD_DELAY_MS: u64 = 2000;
/// Default time the success confirmation stays up
pub const DEFAULT_DISPLAY_DELAY_MS: u64 = 1500;
/// Default maximum upload size (10 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Submission workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Phase 1 duration (`Submitting` → `Success`) in milliseconds
    pub upload_delay_ms: u64,
    /// Phase 2 duration (`Success` → `Empty`) in milliseconds
    pub display_delay_ms: u64,
    /// Largest accepted file
    pub max_file_bytes: u64,
    /// Accepted file types
    pub allowed_types: Vec<FileKind>,
}

impl WorkflowConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With phase 1 duration
    #[inline]
    #[must_use]
    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay_ms = duration_ms(delay);
        self
    }

    /// With phase 2 duration
    #[inline]
    #[must_use]
    pub fn with_display_delay(mut self, delay: Duration) -> Self {
        self.display_delay_ms = duration_ms(delay);
        self
    }

    /// With maximum file size
    #[inline]
    #[must_use]
    pub fn with_max_file_bytes(mut self, max: u64) -> Self {
        self.max_file_bytes = max;
        self
    }

    /// With accepted file types
    #[inline]
    #[must_use]
    pub fn with_allowed_types(mut self, kinds: Vec<FileKind>) -> Self {
        self.allowed_types = kinds;
        self
    }

    /// Length of the upload phase
    #[inline]
    #[must_use]
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    /// Length of the success display
    #[inline]
    #[must_use]
    pub fn display_delay(&self) -> Duration {
        Duration::from_millis(self.display_delay_ms)
    }

    /// Check a selected file against the size and type limits
    ///
    /// # Errors
    /// - `ValidationError::FileTooLarge` if the file exceeds `max_file_bytes`
    /// - `ValidationError::UnsupportedType` if its type is not in `allowed_types`
    pub fn check_file(&self, file: &SelectedFile) -> Result<(), ValidationError> {
        if file.size_bytes > self.max_file_bytes {
            return Err(ValidationError::FileTooLarge {
                name: file.name.clone(),
                size_bytes: file.size_bytes,
                max_bytes: self.max_file_bytes,
            });
        }
        match file.kind() {
            Some(kind) if self.allowed_types.contains(&kind) => Ok(()),
            _ => Err(ValidationError::UnsupportedType {
                name: file.name.clone(),
                allowed: self.allowed_types.clone(),
            }),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload_delay_ms: DEFAULT_UPLOAD_DELAY_MS,
            display_delay_ms: DEFAULT_DISPLAY_DELAY_MS,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            allowed_types: vec![FileKind::Pdf, FileKind::Jpeg, FileKind::Png],
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
