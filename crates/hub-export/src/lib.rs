//! Hub Export
//!
//! Turns catalog records into deterministic plain-text documents and
//! offers them to the user through a download capability.
//!
//! # Core Concepts
//!
//! - [`ExportEngine`]: renders a record and emits the download
//! - [`Clock`]: source of the study-note date line ([`SystemClock`], [`FixedClock`])
//! - [`DownloadSink`]: the platform's "offer file to user" facility
//! - [`sanitize_title`]: whitespace-to-underscore filename rule
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_export::{DirectorySink, ExportEngine, SystemClock};
//! use hub_model::{DocumentKind, ExportableRecord};
//!
//! let engine = ExportEngine::new(SystemClock, DirectorySink::new("downloads"));
//! let record = ExportableRecord::new("AI Trends", "X").with_items(["LLMs", "Retrieval"]);
//! let doc = engine.export(DocumentKind::TrendReport, &record, None)?;
//! println!("offered {}", doc.filename);
//! ```

#![warn(unreachable_pub)]

// Core modules
mod clock;
mod engine;
mod error;
mod filename;
mod sink;
mod template;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock, DATE_FORMAT};
pub use engine::{ExportEngine, ExportedDocument};
pub use error::{DownloadError, ExportError};
pub use filename::{filename_for, sanitize_title};
pub use sink::{DirectorySink, Download, DownloadSink, TEXT_MEDIA_TYPE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
