//! Submission workflow
//!
//! `Empty → Ready → Submitting → Success → Empty`, with a failure edge
//! `Submitting → Ready`. `submit` schedules the two timed phases on the
//! current tokio runtime; every instance owns one cancellation token and
//! closing the instance cancels it, so a discarded dialog never sees a
//! late state write or notification.
//!
//! Phase 1 ends the upload delay after `submit` returns, however late the
//! run is first polled. Phase 2 ends the display delay after `Success`
//! is committed.

use crate::config::WorkflowConfig;
use crate::error::{SubmissionError, ValidationError, WorkflowError};
use crate::notify::{CompletionNotification, CompletionNotifier, LogNotifier};
use crate::state::{validate_transition, Submission, SubmissionForm, SubmissionStatus, WorkflowState};
use crate::transport::{SimulatedTransport, SubmissionTransport};
use hub_model::SelectedFile;
use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How a scheduled submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Both phases elapsed; the notification was emitted
    Completed(CompletionNotification),
    /// Upload failed; the workflow is back in `Ready` with the form intact
    Failed(SubmissionError),
    /// Workflow was closed before the run finished, or the run found the
    /// workflow in a state it may not leave and stopped
    Cancelled,
}

/// Handle to a scheduled submission.
///
/// Dropping the handle does not cancel the run.
#[derive(Debug)]
pub struct SubmissionRun {
    task: JoinHandle<RunOutcome>,
}

impl SubmissionRun {
    /// Wait for the run to finish
    pub async fn outcome(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => RunOutcome::Cancelled,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }

    /// Whether the run has already ended, without waiting
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

struct Inner {
    state: WorkflowState,
    status_tx: watch::Sender<SubmissionStatus>,
}

impl Inner {
    /// Replace the state, refusing moves outside the transition graph.
    ///
    /// A refused move leaves state and observers untouched.
    fn transition(&mut self, next: WorkflowState) -> Result<(), WorkflowError> {
        let from = self.state.status();
        let to = next.status();
        if from != to {
            if let Err(error) = validate_transition(from, to) {
                tracing::error!(%from, %to, "refused submission transition");
                return Err(error);
            }
            tracing::info!(%from, %to, title = next.title(), "submission status changed");
            self.status_tx.send_replace(to);
        }
        self.state = next;
        Ok(())
    }
}

/// Admin submission state machine for one open dialog
pub struct SubmissionWorkflow {
    category: String,
    config: WorkflowConfig,
    inner: Arc<Mutex<Inner>>,
    transport: Arc<dyn SubmissionTransport>,
    notifier: Arc<dyn CompletionNotifier>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for SubmissionWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionWorkflow")
            .field("category", &self.category)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl SubmissionWorkflow {
    /// Create a workflow in `Empty` with the simulated transport and a
    /// logging notifier
    #[must_use]
    pub fn new(category: impl Into<String>, config: WorkflowConfig) -> Self {
        let (status_tx, _) = watch::channel(SubmissionStatus::Empty);
        let transport = Arc::new(SimulatedTransport);
        Self {
            category: category.into(),
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: WorkflowState::default(),
                status_tx,
            })),
            transport,
            notifier: Arc::new(LogNotifier),
            cancel: CancellationToken::new(),
        }
    }

    /// With a different upload transport
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn SubmissionTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// With a different completion notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Category every submission of this dialog is filed under
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Timings and file limits in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.inner.lock().state.status()
    }

    /// Current (trimmed) title
    #[must_use]
    pub fn title(&self) -> String {
        self.inner.lock().state.title().to_string()
    }

    /// File currently attached to the form
    #[must_use]
    pub fn selected_file(&self) -> Option<SelectedFile> {
        self.inner.lock().state.file().cloned()
    }

    /// Observe status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.inner.lock().status_tx.subscribe()
    }

    /// Set the title. Ignored while a submission is in flight.
    pub fn set_title(&self, text: &str) -> SubmissionStatus {
        self.edit(|form| form.set_title(text))
    }

    /// Select a file after checking it against the size and type limits.
    ///
    /// Ignored, without any check, while a submission is in flight.
    ///
    /// # Errors
    /// - `ValidationError::FileTooLarge` / `ValidationError::UnsupportedType`;
    ///   the form is left unchanged
    pub fn select_file(&self, file: SelectedFile) -> Result<SubmissionStatus, ValidationError> {
        self.try_edit(|form| {
            if let Err(error) = self.config.check_file(&file) {
                tracing::debug!(file = %file.name, %error, "file rejected");
                return Err(error);
            }
            form.set_file(Some(file));
            Ok(())
        })
    }

    /// Remove the selected file. Ignored while a submission is in flight.
    pub fn clear_file(&self) -> SubmissionStatus {
        self.edit(|form| form.set_file(None))
    }

    fn edit(&self, apply: impl FnOnce(&mut SubmissionForm)) -> SubmissionStatus {
        let applied = self.try_edit(|form| {
            apply(form);
            Ok::<(), Infallible>(())
        });
        match applied {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }

    /// Apply a fallible edit under the state lock.
    ///
    /// The status check, `apply` and the commit happen under one lock, so
    /// a run cannot move the workflow in between. A failed `apply` commits
    /// nothing.
    fn try_edit<E>(
        &self,
        apply: impl FnOnce(&mut SubmissionForm) -> Result<(), E>,
    ) -> Result<SubmissionStatus, E> {
        let mut inner = self.inner.lock();
        let Some(mut form) = inner.state.editable_form() else {
            let status = inner.state.status();
            tracing::debug!(%status, "edit ignored while submission in flight");
            return Ok(status);
        };
        apply(&mut form)?;
        if let Err(error) = inner.transition(WorkflowState::from_form(form)) {
            tracing::error!(%error, "edit dropped");
        }
        Ok(inner.state.status())
    }

    /// Submit the ready form.
    ///
    /// Moves to `Submitting` immediately and schedules both timed phases.
    ///
    /// # Errors
    /// - `WorkflowError::Precondition` if the status is not `Ready`; from
    ///   `Empty` it carries the missing field
    /// - `WorkflowError::NoRuntime` outside a tokio runtime
    pub fn submit(&self) -> Result<SubmissionRun, WorkflowError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| WorkflowError::NoRuntime)?;
        let started = Instant::now();

        let submission = {
            let mut inner = self.inner.lock();
            let submission = match &inner.state {
                WorkflowState::Ready(submission) => submission.clone(),
                WorkflowState::Empty(form) => {
                    return Err(WorkflowError::Precondition {
                        status: SubmissionStatus::Empty,
                        cause: form.validate().err(),
                    })
                }
                other => {
                    return Err(WorkflowError::Precondition {
                        status: other.status(),
                        cause: None,
                    })
                }
            };
            inner.transition(WorkflowState::Submitting(submission.clone()))?;
            submission
        };

        let run = ScheduledRun {
            inner: Arc::clone(&self.inner),
            transport: Arc::clone(&self.transport),
            notifier: Arc::clone(&self.notifier),
            category: self.category.clone(),
            upload_deadline: started + self.config.upload_delay(),
            display_delay: self.config.display_delay(),
            cancel: self.cancel.clone(),
        };
        Ok(SubmissionRun {
            task: runtime.spawn(run.drive(submission)),
        })
    }

    /// Dismiss the dialog, cancelling any pending phase.
    ///
    /// Dropping the workflow has the same effect.
    pub fn close(self) {
        tracing::debug!(category = %self.category, status = %self.status(), "closing submission workflow");
    }
}

impl Drop for SubmissionWorkflow {
    fn drop(&mut self) {
        // hold the state lock so a phase cannot commit halfway through the cancel
        let _inner = self.inner.lock();
        self.cancel.cancel();
    }
}

/// Everything a scheduled run needs, detached from the workflow value
struct ScheduledRun {
    inner: Arc<Mutex<Inner>>,
    transport: Arc<dyn SubmissionTransport>,
    notifier: Arc<dyn CompletionNotifier>,
    category: String,
    /// End of Phase 1, measured from `submit`
    upload_deadline: Instant,
    /// Length of Phase 2, measured from the `Success` commit
    display_delay: Duration,
    cancel: CancellationToken,
}

impl ScheduledRun {
    async fn drive(self, submission: Submission) -> RunOutcome {
        // Phase 1: upload, the only step that inspects the submission
        let uploaded = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return self.cancelled(),
            result = self.upload(&submission) => result,
        };

        let display_deadline = {
            let mut inner = self.inner.lock();
            if self.cancel.is_cancelled() {
                return self.cancelled();
            }
            if let Err(error) = uploaded {
                tracing::warn!(category = %self.category, %error, "submission failed");
                if let Err(refused) = inner.transition(WorkflowState::Ready(submission)) {
                    return self.abandoned(&refused);
                }
                return RunOutcome::Failed(error);
            }
            if let Err(refused) = inner.transition(WorkflowState::Success(submission.clone())) {
                return self.abandoned(&refused);
            }
            Instant::now() + self.display_delay
        };

        // Phase 2: success display
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => return self.cancelled(),
            () = tokio::time::sleep_until(display_deadline) => {}
        }

        let notification = {
            let mut inner = self.inner.lock();
            if self.cancel.is_cancelled() {
                return self.cancelled();
            }
            if let Err(refused) = inner.transition(WorkflowState::default()) {
                return self.abandoned(&refused);
            }
            CompletionNotification::new(self.category.clone(), submission.title())
        };
        self.notifier.notify(&notification);
        RunOutcome::Completed(notification)
    }

    /// Transport call held open until the upload deadline
    async fn upload(&self, submission: &Submission) -> Result<(), SubmissionError> {
        let (uploaded, ()) = tokio::join!(
            self.transport.upload(&self.category, submission),
            tokio::time::sleep_until(self.upload_deadline),
        );
        uploaded
    }

    fn cancelled(&self) -> RunOutcome {
        tracing::debug!(category = %self.category, "submission run cancelled");
        RunOutcome::Cancelled
    }

    fn abandoned(&self, error: &WorkflowError) -> RunOutcome {
        tracing::error!(category = %self.category, %error, "submission run abandoned");
        RunOutcome::Cancelled
    }
}
