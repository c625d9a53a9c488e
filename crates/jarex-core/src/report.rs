//! Extraction reporting and the anomaly reporter seam.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::ExtractionError;

/// Report of an archive extraction operation.
///
/// Lists what was materialized and every entry that was skipped, so a caller
/// can tell a clean run from a best-effort one.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files successfully extracted.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Number of entries skipped because of a per-entry error.
    pub entries_skipped: usize,

    /// Paths materialized, relative to the destination, in archive order.
    pub extracted: Vec<PathBuf>,

    /// Per-entry failures, in archive order.
    pub anomalies: Vec<Anomaly>,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped entry.
    pub fn record_anomaly(&mut self, anomaly: Anomaly) {
        self.entries_skipped += 1;
        self.anomalies.push(anomaly);
    }

    /// Returns total number of entries materialized.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any entry was skipped.
    #[must_use]
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Returns whether any skipped entry was a path traversal attempt.
    #[must_use]
    pub fn has_traversal_attempts(&self) -> bool {
        self.anomalies
            .iter()
            .any(|a| a.kind == AnomalyKind::PathTraversal)
    }
}

/// Category of a per-entry failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Entry name resolved outside the destination.
    PathTraversal,

    /// Creating or writing the entry failed.
    Io,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTraversal => f.write_str("path traversal"),
            Self::Io => f.write_str("I/O error"),
        }
    }
}

/// A skipped entry together with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// Entry name as stored in the archive.
    pub entry_name: String,

    /// Failure category.
    pub kind: AnomalyKind,

    /// Human-readable cause.
    pub message: String,
}

impl Anomaly {
    /// Builds an anomaly from a per-entry error.
    ///
    /// Returns `None` for stream-level errors, which are never reported as
    /// anomalies.
    #[must_use]
    pub fn from_error(entry_name: &str, err: &ExtractionError) -> Option<Self> {
        let kind = match err {
            ExtractionError::PathTraversal { .. } => AnomalyKind::PathTraversal,
            ExtractionError::Io { .. } => AnomalyKind::Io,
            _ => return None,
        };
        Some(Self {
            entry_name: entry_name.to_string(),
            kind,
            message: err.to_string(),
        })
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped entry '{}': {}", self.entry_name, self.message)
    }
}

/// Receives per-entry anomalies during extraction.
///
/// The extraction engine calls [`report`](Self::report) exactly once per
/// skipped entry. Implement this trait to route anomalies to your own logging
/// or UI.
///
/// # Examples
///
/// ```
/// use jarex_core::Anomaly;
/// use jarex_core::AnomalyReporter;
///
/// struct Stderr;
///
/// impl AnomalyReporter for Stderr {
///     fn report(&mut self, anomaly: &Anomaly) {
///         eprintln!("{anomaly}");
///     }
/// }
/// ```
pub trait AnomalyReporter {
    /// Called once for each skipped entry.
    fn report(&mut self, anomaly: &Anomaly);
}

impl<T: AnomalyReporter + ?Sized> AnomalyReporter for &mut T {
    fn report(&mut self, anomaly: &Anomaly) {
        (**self).report(anomaly);
    }
}

/// Reporter that forwards anomalies to the `log` facade.
///
/// Traversal attempts are logged at `error` level, I/O failures at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl AnomalyReporter for LogReporter {
    fn report(&mut self, anomaly: &Anomaly) {
        match anomaly.kind {
            AnomalyKind::PathTraversal => log::error!(
                target: "jarex",
                "rejected entry '{}': {}",
                anomaly.entry_name,
                anomaly.message
            ),
            AnomalyKind::Io => log::warn!(
                target: "jarex",
                "failed to extract entry '{}': {}",
                anomaly.entry_name,
                anomaly.message
            ),
        }
    }
}

/// Reporter that drops every anomaly.
///
/// The anomalies are still recorded in the [`ExtractionReport`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl AnomalyReporter for NoopReporter {
    fn report(&mut self, _anomaly: &Anomaly) {}
}

/// Reporter that keeps every anomaly in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    /// Anomalies in the order they were reported.
    pub anomalies: Vec<Anomaly>,
}

impl CollectingReporter {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnomalyReporter for CollectingReporter {
    fn report(&mut self, anomaly: &Anomaly) {
        self.anomalies.push(anomaly.clone());
    }
}
