//! Read-only content catalog
//!
//! The catalog is an ordered list of records, each tagged with the
//! template it is exported with. Startup entries additionally list the
//! sections that are briefed one file at a time.

use crate::record::{DocumentKind, ExportableRecord, Section};
use serde::{Deserialize, Serialize};

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Input is not a valid catalog document
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One record plus its export template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Template the entry exports with
    pub kind: DocumentKind,
    /// Content shared by every export of the entry
    #[serde(flatten)]
    pub record: ExportableRecord,
    /// Startup sections, one briefing each
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

impl CatalogEntry {
    /// Entry without sections
    #[must_use]
    pub fn new(kind: DocumentKind, record: ExportableRecord) -> Self {
        Self {
            kind,
            record,
            sections: Vec::new(),
        }
    }

    /// With startup sections
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }
}

/// Ordered collection of catalog entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Catalog over entries, in order
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of entries
    ///
    /// # Errors
    /// Returns error if the JSON does not describe a catalog
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All entries, in catalog order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries exported with the given template
    pub fn entries_of(&self, kind: DocumentKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
