//! `export` and `submit` subcommands

use crate::config::HubConfig;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use hub_export::{Clock, DirectorySink, ExportEngine, ExportedDocument, FixedClock, SystemClock};
use hub_model::{Catalog, DocumentKind, SelectedFile};
use hub_workflow::{
    AdminGate, ChannelNotifier, CompletionNotification, RunOutcome, UploadEntryPoint,
    RESEARCH_CASE_CATEGORY, TREND_REPORT_CATEGORY,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments of `chemhub export`
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Catalog file to export
    pub catalog: PathBuf,
    /// Only export entries of this kind
    pub kind: Option<DocumentKind>,
    /// Download directory, overriding the config
    pub out: Option<PathBuf>,
    /// Study-note date, today when absent
    pub date: Option<NaiveDate>,
}

/// Arguments of `chemhub submit`
#[derive(Debug, Clone)]
pub struct SubmitArgs {
    /// Submission title
    pub title: String,
    /// File to upload
    pub file: PathBuf,
    /// Submission category
    pub category: String,
}

/// Export a JSON catalog into the download directory
///
/// # Errors
/// Returns error if the catalog cannot be read or an entry cannot be rendered
pub fn run_export(config: &HubConfig, args: &ExportArgs) -> Result<Vec<ExportedDocument>> {
    let text = fs::read_to_string(&args.catalog)
        .with_context(|| format!("failed to read catalog {}", args.catalog.display()))?;
    let catalog = Catalog::from_json(&text)
        .with_context(|| format!("invalid catalog {}", args.catalog.display()))?;
    let catalog: Catalog = match args.kind {
        Some(kind) => catalog.entries_of(kind).cloned().collect(),
        None => catalog,
    };

    let out = args.out.as_deref().unwrap_or(config.export.output_dir.as_path());
    let clock: Arc<dyn Clock> = match args.date {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };
    let engine = ExportEngine::from_shared(clock, Arc::new(DirectorySink::new(out)));

    tracing::info!(entries = catalog.len(), out = %out.display(), "exporting catalog");
    Ok(engine.export_catalog(&catalog)?)
}

/// One-line result of an export, counting only documents written to disk
#[must_use]
pub fn export_summary(docs: &[ExportedDocument]) -> String {
    let written = docs.iter().filter(|doc| doc.delivered).count();
    match docs.len() - written {
        0 => format!("Exported {written} document(s)"),
        refused => format!(
            "Exported {written} of {} document(s); {refused} could not be written",
            docs.len()
        ),
    }
}

/// Metadata of a file on disk, as a file picker would report it
///
/// # Errors
/// Returns error if the path does not name a readable regular file
pub fn pick_file(path: &Path) -> Result<SelectedFile> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    Ok(SelectedFile::new(name, metadata.len()))
}

fn entry_point(config: &HubConfig, category: &str) -> UploadEntryPoint {
    let gate = AdminGate::new(Arc::new(config.admin));
    let workflow = config.workflow.clone();
    match category {
        TREND_REPORT_CATEGORY => UploadEntryPoint::trend_reports(gate, workflow),
        RESEARCH_CASE_CATEGORY => UploadEntryPoint::research_cases(gate, workflow),
        other => UploadEntryPoint::new(gate, other, workflow),
    }
}

/// Run one submission through the workflow and wait for its notification
///
/// # Errors
/// Returns error if the identity is not an admin, the form is invalid,
/// or the upload fails or is cancelled
pub async fn run_submit(config: &HubConfig, args: &SubmitArgs) -> Result<CompletionNotification> {
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let mut entry = entry_point(config, &args.category).with_notifier(Arc::new(notifier));
    tracing::debug!(label = entry.label(), dialog = entry.dialog_title(), "entry point");

    let workflow = entry.open().context("submission requires admin rights")?;
    workflow.set_title(&args.title);
    workflow.select_file(pick_file(&args.file)?)?;
    let run = workflow.submit()?;

    match run.outcome().await {
        RunOutcome::Completed(_) => {}
        RunOutcome::Failed(error) => return Err(error.into()),
        RunOutcome::Cancelled => bail!("submission was cancelled"),
    }
    entry.close();
    notifications
        .recv()
        .await
        .context("submission finished without a notification")
}
