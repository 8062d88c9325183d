//! Submission state machine
//!
//! The workflow is one tagged state. Each variant carries only the data
//! valid for it: an editable form while `Empty`, a validated submission
//! from `Ready` on. "Success without a file" is unrepresentable.

use crate::error::{ValidationError, WorkflowError};
use hub_model::SelectedFile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally visible workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Form incomplete
    Empty,
    /// Title and file present, submit enabled
    Ready,
    /// Upload in flight
    Submitting,
    /// Upload done, confirmation showing
    Success,
}

impl SubmissionStatus {
    /// Whether title/file edits are applied in this status
    #[inline]
    #[must_use]
    pub const fn accepts_edits(self) -> bool {
        matches!(self, Self::Empty | Self::Ready)
    }

    /// Whether a timed phase is pending
    #[inline]
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Submitting | Self::Success)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Success => "success",
        };
        f.write_str(name)
    }
}

/// Statuses reachable in one step.
///
/// Edits inside `Empty`/`Ready` that do not change the status are not
/// transitions.
#[must_use]
pub fn allowed_transitions(from: SubmissionStatus) -> &'static [SubmissionStatus] {
    use SubmissionStatus::{Empty, Ready, Submitting, Success};
    match from {
        Empty => &[Ready],
        Ready => &[Empty, Submitting],
        Submitting => &[Success, Ready],
        Success => &[Empty],
    }
}

/// Validates a status transition.
///
/// # Errors
/// Returns `WorkflowError::IllegalTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: SubmissionStatus, to: SubmissionStatus) -> Result<(), WorkflowError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(WorkflowError::IllegalTransition { from, to })
    }
}

/// In-progress title and file selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    title: String,
    file: Option<SelectedFile>,
}

impl SubmissionForm {
    /// Stores the trimmed title
    pub fn set_title(&mut self, text: &str) {
        self.title = text.trim().to_string();
    }

    /// Attach or remove the file
    pub fn set_file(&mut self, file: Option<SelectedFile>) {
        self.file = file;
    }

    /// Trimmed title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Selected file, if any
    #[inline]
    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Ready iff a file is present and the title is non-empty
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.title.is_empty() && self.file.is_some()
    }

    /// Check the form and produce a submission.
    ///
    /// # Errors
    /// - `ValidationError::MissingTitle` if the title is empty
    /// - `ValidationError::MissingFile` if no file is selected
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let file = self.file.clone().ok_or(ValidationError::MissingFile)?;
        Ok(Submission {
            title: self.title.clone(),
            file,
        })
    }
}

impl From<Submission> for SubmissionForm {
    fn from(submission: Submission) -> Self {
        Self {
            title: submission.title,
            file: Some(submission.file),
        }
    }
}

/// A validated form: non-empty title and a selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    title: String,
    file: SelectedFile,
}

impl Submission {
    /// Trimmed title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File to upload
    #[inline]
    #[must_use]
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

/// Tagged workflow state
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WorkflowState {
    Empty(SubmissionForm),
    Ready(Submission),
    Submitting(Submission),
    Success(Submission),
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::Empty(SubmissionForm::default())
    }
}

impl WorkflowState {
    pub(crate) fn status(&self) -> SubmissionStatus {
        match self {
            Self::Empty(_) => SubmissionStatus::Empty,
            Self::Ready(_) => SubmissionStatus::Ready,
            Self::Submitting(_) => SubmissionStatus::Submitting,
            Self::Success(_) => SubmissionStatus::Success,
        }
    }

    /// Settle an edited form into `Empty` or `Ready`
    pub(crate) fn from_form(form: SubmissionForm) -> Self {
        match form.validate() {
            Ok(submission) => Self::Ready(submission),
            Err(_) => Self::Empty(form),
        }
    }

    /// Current form contents, `None` while in flight
    pub(crate) fn editable_form(&self) -> Option<SubmissionForm> {
        match self {
            Self::Empty(form) => Some(form.clone()),
            Self::Ready(submission) => Some(submission.clone().into()),
            Self::Submitting(_) | Self::Success(_) => None,
        }
    }

    pub(crate) fn title(&self) -> &str {
        match self {
            Self::Empty(form) => form.title(),
            Self::Ready(s) | Self::Submitting(s) | Self::Success(s) => s.title(),
        }
    }

    pub(crate) fn file(&self) -> Option<&SelectedFile> {
        match self {
            Self::Empty(form) => form.file(),
            Self::Ready(s) | Self::Submitting(s) | Self::Success(s) => Some(s.file()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Empty,
        SubmissionStatus::Ready,
        SubmissionStatus::Submitting,
        SubmissionStatus::Success,
    ];

    #[test]
    fn cycle_is_allowed() {
        use SubmissionStatus::{Empty, Ready, Submitting, Success};
        assert!(validate_transition(Empty, Ready).is_ok());
        assert!(validate_transition(Ready, Submitting).is_ok());
        assert!(validate_transition(Submitting, Success).is_ok());
        assert!(validate_transition(Success, Empty).is_ok());
        // failure path
        assert!(validate_transition(Submitting, Ready).is_ok());
    }

    #[test]
    fn shortcuts_are_rejected() {
        use SubmissionStatus::{Empty, Ready, Submitting, Success};
        assert!(validate_transition(Empty, Submitting).is_err());
        assert!(validate_transition(Ready, Success).is_err());
        assert!(validate_transition(Success, Ready).is_err());
        assert!(validate_transition(Submitting, Empty).is_err());
    }

    #[test]
    fn form_readiness_requires_both_fields() {
        let mut form = SubmissionForm::default();
        assert_eq!(form.validate(), Err(ValidationError::MissingTitle));

        form.set_title("   ");
        assert_eq!(form.validate(), Err(ValidationError::MissingTitle));

        form.set_title("  Catalyst screening ");
        assert_eq!(form.title(), "Catalyst screening");
        assert_eq!(form.validate(), Err(ValidationError::MissingFile));

        form.set_file(Some(SelectedFile::new("screen.pdf", 100)));
        assert!(form.is_ready());
        assert_eq!(form.validate().unwrap().title(), "Catalyst screening");
    }

    proptest! {
        #[test]
        fn transitions_match_allowed_list(
            from in proptest::sample::select(ALL.to_vec()),
            to in proptest::sample::select(ALL.to_vec()),
        ) {
            let allowed = allowed_transitions(from).contains(&to);
            prop_assert_eq!(validate_transition(from, to).is_ok(), allowed);
        }

        #[test]
        fn settled_state_is_ready_iff_title_and_file(
            title in "[ a-z]{0,12}",
            has_file in any::<bool>(),
        ) {
            let mut form = SubmissionForm::default();
            form.set_title(&title);
            form.set_file(has_file.then(|| SelectedFile::new("a.png", 1)));

            let expected = if !title.trim().is_empty() && has_file {
                SubmissionStatus::Ready
            } else {
                SubmissionStatus::Empty
            };
            prop_assert_eq!(WorkflowState::from_form(form).status(), expected);
        }
    }
}
