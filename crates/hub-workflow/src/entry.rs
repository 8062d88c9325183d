//! Upload entry points
//!
//! Each page section that accepts admin uploads has one entry point: a
//! button shown only to administrators and the dialog it opens. Closing
//! the dialog discards its workflow; reopening starts a fresh one.

use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use crate::gate::AdminGate;
use crate::notify::{CompletionNotifier, LogNotifier};
use crate::transport::{SimulatedTransport, SubmissionTransport};
use crate::workflow::SubmissionWorkflow;
use std::sync::Arc;

/// Category of the insights section uploads
pub const TREND_REPORT_CATEGORY: &str = "Trend Report";
/// Category of the gallery section uploads
pub const RESEARCH_CASE_CATEGORY: &str = "Research Case";

/// Admin upload button plus its dialog
pub struct UploadEntryPoint {
    gate: AdminGate,
    category: String,
    label: String,
    dialog_title: String,
    config: WorkflowConfig,
    transport: Arc<dyn SubmissionTransport>,
    notifier: Arc<dyn CompletionNotifier>,
    open: Option<SubmissionWorkflow>,
}

impl std::fmt::Debug for UploadEntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadEntryPoint")
            .field("category", &self.category)
            .field("label", &self.label)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl UploadEntryPoint {
    /// Create an entry point for a category
    #[must_use]
    pub fn new(gate: AdminGate, category: impl Into<String>, config: WorkflowConfig) -> Self {
        let category = category.into();
        let transport = Arc::new(SimulatedTransport);
        Self {
            gate,
            label: format!("Upload {category}"),
            dialog_title: format!("Register {category}"),
            category,
            config,
            transport,
            notifier: Arc::new(LogNotifier),
            open: None,
        }
    }

    /// "Upload Report" button of the insights section
    #[must_use]
    pub fn trend_reports(gate: AdminGate, config: WorkflowConfig) -> Self {
        Self::new(gate, TREND_REPORT_CATEGORY, config).with_label("Upload Report")
    }

    /// "Upload Case" button of the research gallery
    #[must_use]
    pub fn research_cases(gate: AdminGate, config: WorkflowConfig) -> Self {
        Self::new(gate, RESEARCH_CASE_CATEGORY, config).with_label("Upload Case")
    }

    /// With button label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// With dialog heading
    #[must_use]
    pub fn with_dialog_title(mut self, title: impl Into<String>) -> Self {
        self.dialog_title = title.into();
        self
    }

    /// With transport used by dialogs opened from now on
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn SubmissionTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// With notifier used by dialogs opened from now on
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Category submissions are filed under
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Button label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Dialog heading
    #[inline]
    #[must_use]
    pub fn dialog_title(&self) -> &str {
        &self.dialog_title
    }

    /// Whether the upload button should be rendered
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.gate.is_authorized()
    }

    /// Whether a dialog is open
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The open dialog's workflow, if any
    #[inline]
    #[must_use]
    pub fn workflow(&self) -> Option<&SubmissionWorkflow> {
        self.open.as_ref()
    }

    /// Open the dialog, or return the one already open.
    ///
    /// # Errors
    /// - `WorkflowError::Unauthorized` if the gate denies the current identity
    pub fn open(&mut self) -> Result<&SubmissionWorkflow, WorkflowError> {
        if !self.gate.is_authorized() {
            tracing::warn!(category = %self.category, "upload dialog requested without admin rights");
            return Err(WorkflowError::Unauthorized);
        }
        let workflow = self.open.get_or_insert_with(|| {
            tracing::debug!(category = %self.category, "opening upload dialog");
            SubmissionWorkflow::new(self.category.clone(), self.config.clone())
                .with_transport(Arc::clone(&self.transport))
                .with_notifier(Arc::clone(&self.notifier))
        });
        Ok(workflow)
    }

    /// Close the dialog, cancelling any pending submission phase
    pub fn close(&mut self) {
        if let Some(workflow) = self.open.take() {
            workflow.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_model::AdminIdentity;

    #[test]
    fn visitors_see_no_entry_point() {
        let mut entry = UploadEntryPoint::trend_reports(
            AdminGate::from(AdminIdentity::visitor()),
            WorkflowConfig::default(),
        );

        assert!(!entry.is_visible());
        assert_eq!(entry.open().unwrap_err(), WorkflowError::Unauthorized);
        assert!(!entry.is_open());
    }

    #[test]
    fn presets_carry_category_and_label() {
        let gate = AdminGate::from(AdminIdentity::admin());
        let cases = UploadEntryPoint::research_cases(gate.clone(), WorkflowConfig::default());
        assert_eq!(cases.category(), "Research Case");
        assert_eq!(cases.label(), "Upload Case");
        assert_eq!(cases.dialog_title(), "Register Research Case");

        let reports = UploadEntryPoint::trend_reports(gate, WorkflowConfig::default());
        assert_eq!(reports.label(), "Upload Report");
    }

    #[test]
    fn open_is_idempotent_while_open() {
        let mut entry = UploadEntryPoint::research_cases(
            AdminGate::from(AdminIdentity::admin()),
            WorkflowConfig::default(),
        );
        entry.open().unwrap().set_title("Kept");
        assert_eq!(entry.open().unwrap().title(), "Kept");

        entry.close();
        assert!(!entry.is_open());
        assert_eq!(entry.open().unwrap().title(), "");
    }
}
