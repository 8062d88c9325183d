//! Error types for the submission workflow
//!
//! - Validation failures (missing title/file, oversized or disallowed file)
//! - Precondition failures (`submit` outside `Ready`)
//! - Transport failures of a real backend
//! - Authorization refusals at the entry point

use crate::state::SubmissionStatus;
use hub_model::FileKind;

/// Form or file validation failures.
///
/// Raised before any state change; the form is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title is empty after trimming
    #[error("a title is required")]
    MissingTitle,

    /// No file has been selected
    #[error("a file must be selected")]
    MissingFile,

    /// Selected file exceeds the size limit
    #[error("{name} is {size_bytes} bytes, limit is {max_bytes} bytes")]
    FileTooLarge {
        name: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    /// Selected file type is not accepted
    #[error("{name} is not an accepted file type (accepted: {})", display_kinds(.allowed))]
    UnsupportedType { name: String, allowed: Vec<FileKind> },
}

fn display_kinds(kinds: &[FileKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Transport failures while uploading.
///
/// The simulated transport never produces these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Backend could not be reached
    #[error("upload failed: {0}")]
    Transport(String),

    /// Backend refused the submission
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// Main workflow error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Form or file validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `submit` called outside `Ready`
    #[error("cannot submit while {status}")]
    Precondition {
        /// Status at the time of the call
        status: SubmissionStatus,
        /// What the form is missing, when called from `Empty`
        #[source]
        cause: Option<ValidationError>,
    },

    /// Upload failed
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Entry point opened without admin rights
    #[error("submission is restricted to administrators")]
    Unauthorized,

    /// Timed phases need a tokio runtime
    #[error("submit must be called within a tokio runtime")]
    NoRuntime,

    /// Transition outside the allowed graph
    #[error("illegal transition {from} -> {to}")]
    IllegalTransition {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },
}

impl WorkflowError {
    /// Check if error is a `submit` precondition failure
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    /// Check if the user can fix the cause and try again from the form
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NoRuntime | Self::IllegalTransition { .. })
    }

    /// Validation failure behind this error, if any
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Precondition { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_lists_accepted_kinds() {
        let err = ValidationError::UnsupportedType {
            name: "notes.docx".into(),
            allowed: vec![FileKind::Pdf, FileKind::Jpeg, FileKind::Png],
        };
        assert_eq!(
            err.to_string(),
            "notes.docx is not an accepted file type (accepted: PDF, JPG, PNG)"
        );
    }

    #[test]
    fn precondition_exposes_validation_cause() {
        let err = WorkflowError::Precondition {
            status: SubmissionStatus::Empty,
            cause: Some(ValidationError::MissingFile),
        };
        assert!(err.is_precondition());
        assert!(err.is_recoverable());
        assert_eq!(err.validation(), Some(&ValidationError::MissingFile));
        assert_eq!(err.to_string(), "cannot submit while empty");
    }
}
