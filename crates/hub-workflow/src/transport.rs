//! Upload transport
//!
//! Phase 1 of a submission is a call to [`SubmissionTransport::upload`].
//! The hub ships only [`SimulatedTransport`]; a real backend plugs in
//! here without changing the state machine. Phase 1 timing belongs to
//! the workflow, which holds the phase open until the configured upload
//! delay after `submit` has elapsed, however fast the transport returns.

use crate::error::SubmissionError;
use crate::state::Submission;
use async_trait::async_trait;

/// Delivers a validated submission to a backend
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Upload the submission under a category.
    ///
    /// # Errors
    /// Returns `SubmissionError` if the backend could not take the upload
    async fn upload(&self, category: &str, submission: &Submission) -> Result<(), SubmissionError>;
}

/// Simulated backend: accepts every upload
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTransport;

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn upload(&self, category: &str, submission: &Submission) -> Result<(), SubmissionError> {
        tracing::debug!(
            category,
            title = submission.title(),
            file = %submission.file().name,
            "simulating upload"
        );
        Ok(())
    }
}
