//! Zip-slip safe extraction of JAR and ZIP archives.
//!
//! `jarex-core` unpacks an archive stream into a destination directory. Every
//! entry name is attacker-controlled, so before anything touches the disk the
//! name is resolved against the real filesystem (symlinks followed) and must
//! land strictly inside the destination. Entries that escape are rejected,
//! reported and skipped; the rest of the archive is still extracted.
//!
//! # Examples
//!
//! ```no_run
//! use jarex_core::ExtractionConfig;
//! use jarex_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractionConfig::default();
//! let report = extract_archive("robots/sample.jar", "/output/dir", &config)?;
//! println!("Extracted {} files", report.files_extracted);
//! for anomaly in &report.anomalies {
//!     eprintln!("{anomaly}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
pub mod security;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_from_source;
pub use config::ErrorPolicy;
pub use config::ExtractionConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use report::Anomaly;
pub use report::AnomalyKind;
pub use report::AnomalyReporter;
pub use report::CollectingReporter;
pub use report::ExtractionReport;
pub use report::LogReporter;
pub use report::NoopReporter;
pub use source::ArchiveSource;
pub use source::ArchiveStream;
pub use source::Locator;
pub use source::ReaderSource;
#[cfg(feature = "remote")]
pub use source::RemoteSource;
pub use source::SeekableSource;

// Re-export types module for easier access
pub use types::ArchiveEntry;
pub use types::DestDir;
pub use types::ResolvedPath;
