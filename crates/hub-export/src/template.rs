//! Literal document templates
//!
//! Section headers and their order are relied on by downstream archival
//! tooling and must not change. Lines are joined with `\n` and documents
//! carry no trailing newline.

use hub_model::{DataPoint, ExportableRecord};

pub(crate) const TREND_BANNER: &str = "GLOBAL CHEMICAL AI TRENDS REPORT 2024";
pub(crate) const TREND_FOOTER: &str =
    "Prepared by IKARUS Strategy Team\nConfidential - Internal Use Only";
pub(crate) const HUB_FOOTER: &str = "ChemAI Knowledge Hub";
pub(crate) const STUDY_NOTE_FOOTER: &str = "ChemAI Knowledge Hub\nResearch Use Case Document";

/// Trend report: banner, overview, key topics, strategy-team footer
pub(crate) fn trend_report(record: &ExportableRecord) -> String {
    let topics = bullet_lines(record.items.iter().map(String::as_str));
    format!(
        "{banner}\n\nOverview:\n{overview}\n\nKey Topics:\n{topics}\n\n---\n{footer}",
        banner = TREND_BANNER,
        overview = record.description,
        footer = TREND_FOOTER,
    )
}

/// Startup briefing for one section of the open-innovation card
pub(crate) fn startup_briefing(record: &ExportableRecord, section_title: &str) -> String {
    format!(
        "OPEN INNOVATION: {section_title}\n\nDescription:\n{description}\n\nSection Focus:\n{section_title}\n\n---\n{footer}",
        description = record.description,
        footer = HUB_FOOTER,
    )
}

/// Study note with category, date and data summary
pub(crate) fn study_note(record: &ExportableRecord, date: &str) -> String {
    let summary = bullet_lines(record.data_points.iter().map(summary_line));
    format!(
        "STUDY NOTE: {title}\nCategory: {category}\nDate: {date}\n\nDescription:\n{description}\n\nData Summary:\n{summary}\n\n---\n{footer}",
        title = record.title,
        category = record.category,
        description = record.description,
        footer = STUDY_NOTE_FOOTER,
    )
}

fn summary_line(point: &DataPoint) -> String {
    format!("{}: {}", point.label, point.value)
}

fn bullet_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
