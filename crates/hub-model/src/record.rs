//! Exportable records and document kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One labelled percentage shown in a record's chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Chart label
    pub label: String,
    /// Percentage value, 0-100
    pub value: f64,
    /// Presentation color class; ignored by export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DataPoint {
    /// Create a data point without presentation color
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }
}

/// Structured content turned into a downloadable text document.
///
/// Records are supplied by an external content source and are never
/// mutated by this workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportableRecord {
    /// Display title
    pub title: String,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Free text description
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Labelled numeric values
    #[serde(default, alias = "chartData")]
    pub data_points: Vec<DataPoint>,
    /// Key topics listed by trend reports
    #[serde(default)]
    pub items: Vec<String>,
    /// Study-note identifier, used as the filename prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
}

impl ExportableRecord {
    /// Create a record with a title and description
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// With an appended data point
    #[inline]
    #[must_use]
    pub fn with_data_point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.data_points.push(DataPoint::new(label, value));
        self
    }

    /// With key topics
    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// With study-note identifier
    #[inline]
    #[must_use]
    pub fn with_note_id(mut self, note_id: impl Into<String>) -> Self {
        self.note_id = Some(note_id.into());
        self
    }
}

/// A sub-area of the startup card, exported as its own briefing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub title: String,
    /// Section text
    #[serde(default, alias = "desc")]
    pub description: String,
}

impl Section {
    /// Section with a heading and text
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Template a record is exported with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Global trends report with key topics
    TrendReport,
    /// Open-innovation briefing for one startup section
    StartupBriefing,
    /// Research use-case note with a data summary
    StudyNote,
}

impl DocumentKind {
    /// All kinds, in display order
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::TrendReport,
        DocumentKind::StartupBriefing,
        DocumentKind::StudyNote,
    ];

    /// Command-line spelling of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrendReport => "trend-report",
            Self::StartupBriefing => "startup-briefing",
            Self::StudyNote => "study-note",
        }
    }

    /// Whether rendering needs a section title
    #[inline]
    #[must_use]
    pub const fn requires_section(self) -> bool {
        matches!(self, Self::StartupBriefing)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown document kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document kind: {0} (expected trend-report, startup-briefing or study-note)")]
pub struct ParseKindError(pub String);

impl FromStr for DocumentKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
