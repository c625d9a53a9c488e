//! Error conversion utilities for CLI.
//!
//! Converts jarex-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use jarex_core::ExtractionError;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, source: &str) -> anyhow::Error {
    match err {
        ExtractionError::PathTraversal { entry_name } => {
            anyhow!(
                "Security violation: Archive '{source}' attempted path traversal with '{entry_name}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources."
            )
        }
        ExtractionError::Io { path, source: io_err } => {
            anyhow!(
                "I/O error while extracting '{source}' at '{}': {io_err}",
                path.display()
            )
        }
        ExtractionError::Source(io_err) => {
            anyhow!("Failed to read archive '{source}': {io_err}")
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{source}': {reason}\n\
                 HINT: The archive may be corrupted, truncated or not a JAR/ZIP file."
            )
        }
        ExtractionError::UnsupportedLocator { locator } => {
            anyhow!(
                "Unsupported archive location: {locator}\n\
                 HINT: Use a local path or a file:, http:, https: or jar: URL pointing at the archive root."
            )
        }
        ExtractionError::InvalidConfig(reason) => anyhow!("Invalid configuration: {reason}"),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(result: Result<T, ExtractionError>, source: &str) -> Result<T> {
    result.map_err(|e| convert_extraction_error(e, source))
}
