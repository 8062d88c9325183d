//! Testing utilities for the hub workspace
//!
//! Shared fixtures, recording fakes and scheduling helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use hub_export::{Download, DownloadError, DownloadSink, ExportEngine, FixedClock};
use hub_model::{Catalog, CatalogEntry, DocumentKind, ExportableRecord, Section, SelectedFile};
use hub_workflow::{
    CompletionNotification, CompletionNotifier, Submission, SubmissionError, SubmissionTransport,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Captures every offered download
#[derive(Debug, Default)]
pub struct RecordingSink {
    downloads: Mutex<Vec<Download>>,
}

impl RecordingSink {
    /// Every download offered so far
    pub fn downloads(&self) -> Vec<Download> {
        self.downloads.lock().clone()
    }

    /// Filenames offered so far, in order
    pub fn filenames(&self) -> Vec<String> {
        self.downloads
            .lock()
            .iter()
            .map(|d| d.filename.clone())
            .collect()
    }
}

impl DownloadSink for RecordingSink {
    fn offer(&self, download: &Download) -> Result<(), DownloadError> {
        self.downloads.lock().push(download.clone());
        Ok(())
    }
}

/// Refuses every download
#[derive(Debug, Default)]
pub struct RejectingSink;

impl DownloadSink for RejectingSink {
    fn offer(&self, _download: &Download) -> Result<(), DownloadError> {
        Err(DownloadError::Rejected("downloads disabled".to_string()))
    }
}

/// Captures every completion notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<CompletionNotification>>,
}

impl RecordingNotifier {
    /// Every notification so far
    pub fn received(&self) -> Vec<CompletionNotification> {
        self.received.lock().clone()
    }

    /// Number of notifications so far
    pub fn count(&self) -> usize {
        self.received.lock().len()
    }
}

impl CompletionNotifier for RecordingNotifier {
    fn notify(&self, notification: &CompletionNotification) {
        self.received.lock().push(notification.clone());
    }
}

/// Waits, then fails with a transport error
#[derive(Debug, Clone)]
pub struct FailingTransport {
    /// Time before the upload fails
    pub delay: Duration,
    /// Transport error message
    pub reason: String,
}

impl FailingTransport {
    /// Transport failing after `delay` with `reason`
    pub fn new(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SubmissionTransport for FailingTransport {
    async fn upload(&self, _category: &str, _submission: &Submission) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.delay).await;
        Err(SubmissionError::Transport(self.reason.clone()))
    }
}

/// Let spawned tasks run up to their next suspension point
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// 1 May 2024
pub fn fixed_clock() -> FixedClock {
    FixedClock::ymd(2024, 5, 1).expect("valid date")
}

/// Engine with a fixed clock and a recording sink
pub fn recording_engine() -> (ExportEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let engine = ExportEngine::from_shared(Arc::new(fixed_clock()), sink.clone());
    (engine, sink)
}

/// Small PDF selection
pub fn pdf_file(name: &str) -> SelectedFile {
    SelectedFile::new(name, 48 * 1024).with_media_type("application/pdf")
}

/// Trend record with two key topics
pub fn ai_trends_record() -> ExportableRecord {
    ExportableRecord::new(
        "AI Trends",
        "Generative models are reshaping chemical R&D.",
    )
    .with_data_point("Adoption", 72.0)
    .with_items(["LLMs", "Retrieval"])
}

/// Study-note record with one data point
pub fn polymer_qa_record() -> ExportableRecord {
    ExportableRecord::new("Polymer QA", "Automated quality checks for polymer batches.")
        .with_category("QA")
        .with_note_id("NOTE-02")
        .with_data_point("Accuracy", 91.0)
}

/// Startup entry with two sections
pub fn open_innovation_entry() -> CatalogEntry {
    CatalogEntry::new(
        DocumentKind::StartupBriefing,
        ExportableRecord::new("Open Innovation", "Scouting startups for joint pilots."),
    )
    .with_sections(vec![
        Section::new("Bio Materials", "Bio-based feedstocks"),
        Section::new("Process AI", "Plant optimisation"),
    ])
}

/// One entry of every kind, trend report first
pub fn sample_catalog() -> Catalog {
    [
        CatalogEntry::new(DocumentKind::TrendReport, ai_trends_record()),
        open_innovation_entry(),
        CatalogEntry::new(DocumentKind::StudyNote, polymer_qa_record()),
    ]
    .into_iter()
    .collect()
}
