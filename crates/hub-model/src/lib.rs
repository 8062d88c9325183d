//! Hub Model
//!
//! Plain data shared by the export engine and the submission workflow.
//!
//! # Core Concepts
//!
//! - [`ExportableRecord`]: one piece of catalog content that can become a text document
//! - [`DocumentKind`]: which template a record is exported with
//! - [`Catalog`]: ordered, serde-loadable collection of records
//! - [`AdminIdentity`]: startup-time authorization flag
//! - [`SelectedFile`]: metadata of a file picked for submission
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_model::{Catalog, DocumentKind};
//!
//! let catalog = Catalog::from_json(&std::fs::read_to_string("catalog.json")?)?;
//! for entry in catalog.entries_of(DocumentKind::StudyNote) {
//!     println!("{}", entry.record.title);
//! }
//! ```

#![warn(unreachable_pub)]

// Core modules
mod catalog;
mod file;
mod identity;
mod record;

// Re-exports
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use file::{FileHandle, FileKind, SelectedFile};
pub use identity::AdminIdentity;
pub use record::{DataPoint, DocumentKind, ExportableRecord, ParseKindError, Section};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
