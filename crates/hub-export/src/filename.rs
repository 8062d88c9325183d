//! Download filenames: `<DocumentKind>_<SanitizedTitle>.txt`

use crate::error::ExportError;
use hub_model::{DocumentKind, ExportableRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Replace every whitespace run with a single underscore.
///
/// All other characters pass through unchanged.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, "_").into_owned()
}

/// Filename under which a rendered document is offered.
///
/// # Errors
/// Returns [`ExportError::MissingSectionTitle`] for a startup briefing
/// without a section title
pub fn filename_for(
    kind: DocumentKind,
    record: &ExportableRecord,
    section_title: Option<&str>,
) -> Result<String, ExportError> {
    let (prefix, title) = match kind {
        DocumentKind::TrendReport => ("Trend_Report", record.title.as_str()),
        DocumentKind::StartupBriefing => ("Startup_Briefing", require_section(kind, section_title)?),
        DocumentKind::StudyNote => (
            record.note_id.as_deref().unwrap_or("Study_Note"),
            record.title.as_str(),
        ),
    };
    Ok(format!("{}_{}.txt", sanitize_title(prefix), sanitize_title(title)))
}

pub(crate) fn require_section(
    kind: DocumentKind,
    section_title: Option<&str>,
) -> Result<&str, ExportError> {
    section_title
        .filter(|title| !title.trim().is_empty())
        .ok_or(ExportError::MissingSectionTitle { kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn consecutive_whitespace_collapses_to_one_underscore() {
        assert_eq!(sanitize_title("Open Lab  Notes"), "Open_Lab_Notes");
        assert_eq!(sanitize_title("tab\tand\nnewline"), "tab_and_newline");
        assert_eq!(sanitize_title(" edge "), "_edge_");
        assert_eq!(sanitize_title("Ä/ß:é"), "Ä/ß:é");
    }

    #[test]
    fn filenames_follow_kind_prefix() {
        let record = ExportableRecord::new("Polymer QA", "").with_note_id("NOTE-03");
        assert_eq!(
            filename_for(DocumentKind::StudyNote, &record, None).unwrap(),
            "NOTE-03_Polymer_QA.txt"
        );
        assert_eq!(
            filename_for(DocumentKind::TrendReport, &record, None).unwrap(),
            "Trend_Report_Polymer_QA.txt"
        );
        assert_eq!(
            filename_for(DocumentKind::StartupBriefing, &record, Some("Bio Materials")).unwrap(),
            "Startup_Briefing_Bio_Materials.txt"
        );
    }

    #[test]
    fn study_note_without_id_uses_generic_prefix() {
        let record = ExportableRecord::new("Yield Model", "");
        assert_eq!(
            filename_for(DocumentKind::StudyNote, &record, None).unwrap(),
            "Study_Note_Yield_Model.txt"
        );
    }

    #[test]
    fn startup_briefing_needs_section() {
        let record = ExportableRecord::new("Open Innovation", "");
        for section in [None, Some(""), Some("   ")] {
            assert_eq!(
                filename_for(DocumentKind::StartupBriefing, &record, section),
                Err(ExportError::MissingSectionTitle {
                    kind: DocumentKind::StartupBriefing
                })
            );
        }
    }

    proptest! {
        #[test]
        fn sanitized_titles_contain_no_whitespace(title in "\\PC{0,40}") {
            let sanitized = sanitize_title(&title);
            prop_assert!(!sanitized.chars().any(char::is_whitespace));
            prop_assert!(!sanitized.contains("__") || title.contains('_'));
        }

        #[test]
        fn titles_without_whitespace_pass_through(title in "[A-Za-z0-9_.:-]{0,40}") {
            prop_assert_eq!(sanitize_title(&title), title);
        }
    }
}
