//! Export engine
//!
//! Renders records with the literal templates and hands the result to a
//! [`DownloadSink`]. Rendering never mutates the record and is
//! deterministic for a given clock.

use crate::clock::{Clock, DATE_FORMAT};
use crate::error::ExportError;
use crate::filename::{filename_for, require_section};
use crate::sink::{Download, DownloadSink};
use crate::template;
use hub_model::{Catalog, DocumentKind, ExportableRecord};
use std::sync::Arc;

/// A rendered document and whether the sink took it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// Template used
    pub kind: DocumentKind,
    /// Name the download was offered under
    pub filename: String,
    /// Rendered text
    pub content: String,
    /// `false` if the sink refused the download; the failure was logged
    pub delivered: bool,
}

/// Record-to-download engine
#[derive(Clone)]
pub struct ExportEngine {
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DownloadSink>,
}

impl std::fmt::Debug for ExportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportEngine").finish_non_exhaustive()
    }
}

impl ExportEngine {
    /// Create engine with a clock and a download capability
    #[must_use]
    pub fn new(clock: impl Clock + 'static, sink: impl DownloadSink + 'static) -> Self {
        Self::from_shared(Arc::new(clock), Arc::new(sink))
    }

    /// Create engine from already shared collaborators
    #[must_use]
    pub fn from_shared(clock: Arc<dyn Clock>, sink: Arc<dyn DownloadSink>) -> Self {
        Self { clock, sink }
    }

    /// Render a record as plain text.
    ///
    /// # Arguments
    /// * `kind` - Template to use
    /// * `record` - Content to render
    /// * `section_title` - Section a startup briefing is about; ignored by other kinds
    ///
    /// # Errors
    /// - `ExportError::MissingSectionTitle` if a startup briefing has no section title
    pub fn render(
        &self,
        kind: DocumentKind,
        record: &ExportableRecord,
        section_title: Option<&str>,
    ) -> Result<String, ExportError> {
        let content = match kind {
            DocumentKind::TrendReport => template::trend_report(record),
            DocumentKind::StartupBriefing => {
                template::startup_briefing(record, require_section(kind, section_title)?)
            }
            DocumentKind::StudyNote => {
                let date = self.clock.today().format(DATE_FORMAT).to_string();
                template::study_note(record, &date)
            }
        };
        Ok(content)
    }

    /// Offer content to the user as a UTF-8 text file.
    ///
    /// Fire-and-forget: a failing sink is logged and otherwise ignored.
    pub fn emit_download(&self, filename: &str, content: &str) {
        self.offer(filename, content);
    }

    fn offer(&self, filename: &str, content: &str) -> bool {
        let download = Download::text(filename, content);
        match self.sink.offer(&download) {
            Ok(()) => {
                tracing::debug!(filename, bytes = download.payload.len(), "download offered");
                true
            }
            Err(error) => {
                tracing::warn!(filename, %error, "download could not be offered");
                false
            }
        }
    }

    /// Render a record, build its filename and offer it for download.
    ///
    /// A refused download is not an error; it shows up as
    /// [`ExportedDocument::delivered`] being `false`.
    ///
    /// # Errors
    /// Same as [`ExportEngine::render`]
    pub fn export(
        &self,
        kind: DocumentKind,
        record: &ExportableRecord,
        section_title: Option<&str>,
    ) -> Result<ExportedDocument, ExportError> {
        let content = self.render(kind, record, section_title)?;
        let filename = filename_for(kind, record, section_title)?;
        tracing::info!(%kind, title = %record.title, %filename, "exporting document");
        let delivered = self.offer(&filename, &content);
        Ok(ExportedDocument {
            kind,
            filename,
            content,
            delivered,
        })
    }

    /// Export every catalog entry in order.
    ///
    /// Startup entries produce one briefing per section.
    ///
    /// # Errors
    /// Stops at the first entry that cannot be rendered
    pub fn export_catalog(&self, catalog: &Catalog) -> Result<Vec<ExportedDocument>, ExportError> {
        let mut exported = Vec::with_capacity(catalog.len());
        for entry in catalog.entries() {
            if entry.kind.requires_section() {
                if entry.sections.is_empty() {
                    tracing::warn!(title = %entry.record.title, "startup entry has no sections");
                }
                for section in &entry.sections {
                    exported.push(self.export(entry.kind, &entry.record, Some(&section.title))?);
                }
            } else {
                exported.push(self.export(entry.kind, &entry.record, None)?);
            }
        }
        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::DownloadError;
    use crate::sink::{MockDownloadSink, TEXT_MEDIA_TYPE};

    fn clock() -> FixedClock {
        FixedClock::ymd(2024, 5, 1).unwrap()
    }

    fn polymer_note() -> ExportableRecord {
        ExportableRecord::new("Polymer QA", "Automated checks")
            .with_category("QA")
            .with_note_id("NOTE-01")
            .with_data_point("Accuracy", 91.0)
    }

    #[test]
    fn render_is_deterministic_for_fixed_clock() {
        let engine = ExportEngine::new(clock(), MockDownloadSink::new());
        let record = polymer_note();

        let first = engine.render(DocumentKind::StudyNote, &record, None).unwrap();
        let second = engine.render(DocumentKind::StudyNote, &record, None).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("Date: 2024-05-01\n"));
        assert!(first.contains("Data Summary:\n- Accuracy: 91\n"));
    }

    #[test]
    fn render_does_not_touch_the_sink() {
        let mut sink = MockDownloadSink::new();
        sink.expect_offer().never();
        let engine = ExportEngine::new(clock(), sink);

        engine
            .render(DocumentKind::TrendReport, &polymer_note(), None)
            .unwrap();
    }

    #[test]
    fn export_offers_utf8_text_once() {
        let mut sink = MockDownloadSink::new();
        sink.expect_offer()
            .withf(|d: &Download| {
                d.filename == "NOTE-01_Polymer_QA.txt"
                    && d.media_type == TEXT_MEDIA_TYPE
                    && std::str::from_utf8(&d.payload).is_ok_and(|s| s.starts_with("STUDY NOTE: Polymer QA"))
            })
            .times(1)
            .returning(|_| Ok(()));
        let engine = ExportEngine::new(clock(), sink);

        let doc = engine
            .export(DocumentKind::StudyNote, &polymer_note(), None)
            .unwrap();
        assert_eq!(doc.filename, "NOTE-01_Polymer_QA.txt");
        assert!(doc.delivered);
    }

    #[test]
    fn sink_failure_is_not_surfaced() {
        let mut sink = MockDownloadSink::new();
        sink.expect_offer()
            .times(1)
            .returning(|_| Err(DownloadError::Rejected("quota".into())));
        let engine = ExportEngine::new(clock(), sink);

        let doc = engine
            .export(DocumentKind::TrendReport, &polymer_note(), None)
            .unwrap();
        assert!(!doc.delivered);
        assert!(doc.content.contains("Polymer QA"));
    }

    #[test]
    fn missing_section_emits_nothing() {
        let mut sink = MockDownloadSink::new();
        sink.expect_offer().never();
        let engine = ExportEngine::new(clock(), sink);

        let err = engine
            .export(DocumentKind::StartupBriefing, &polymer_note(), None)
            .unwrap_err();
        assert_eq!(
            err,
            ExportError::MissingSectionTitle {
                kind: DocumentKind::StartupBriefing
            }
        );
    }
}
