//! Hub Workflow - admin submission
//!
//! - [`AdminGate`] decides whether upload affordances are shown
//! - [`UploadEntryPoint`] owns the upload button and its dialog
//! - [`SubmissionWorkflow`] runs `Empty → Ready → Submitting → Success → Empty`
//!   with two timed, cancellable phases
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_workflow::{AdminGate, UploadEntryPoint, WorkflowConfig};
//! use hub_model::{AdminIdentity, SelectedFile};
//!
//! let gate = AdminGate::from(AdminIdentity::admin());
//! let mut entry = UploadEntryPoint::trend_reports(gate, WorkflowConfig::default());
//!
//! let workflow = entry.open()?;
//! workflow.set_title("Q3 outlook");
//! workflow.select_file(SelectedFile::new("q3.pdf", 52_000))?;
//! let run = workflow.submit()?;
//! println!("{:?}", run.outcome().await);
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod entry;
pub mod error;
pub mod gate;
pub mod notify;
pub mod state;
pub mod transport;
pub mod workflow;

// Re-exports
pub use config::WorkflowConfig;
pub use entry::{UploadEntryPoint, RESEARCH_CASE_CATEGORY, TREND_REPORT_CATEGORY};
pub use error::{SubmissionError, ValidationError, WorkflowError};
pub use gate::AdminGate;
pub use notify::{ChannelNotifier, CompletionNotification, CompletionNotifier, LogNotifier};
pub use state::{allowed_transitions, validate_transition, Submission, SubmissionForm, SubmissionStatus};
pub use transport::{SimulatedTransport, SubmissionTransport};
pub use workflow::{RunOutcome, SubmissionRun, SubmissionWorkflow};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
