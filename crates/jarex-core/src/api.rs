//! High-level public API for archive extraction.

use std::path::Path;

use crate::AnomalyReporter;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::LogReporter;
use crate::Result;
use crate::extraction::ExtractionEngine;
use crate::source::ArchiveSource;

/// Extracts a JAR or ZIP file to the specified output directory.
///
/// This is the main high-level API. Every entry name is validated against
/// the output directory before anything is written; rejected and failed
/// entries are logged through the `log` facade and listed in the report.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `output_dir` - Directory where files will be extracted
/// * `config` - Extraction configuration
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The archive file or the output directory cannot be opened
/// - The archive is malformed or its stream fails
/// - An entry fails and `config.error_policy` is `Abort`
///
/// # Examples
///
/// ```no_run
/// use jarex_core::ExtractionConfig;
/// use jarex_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::default();
/// let report = extract_archive("robots/sample.jar", "/tmp/robots", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    let mut source = archive_path.as_ref().to_path_buf();
    extract_from_source(&mut source, output_dir, config, LogReporter)
}

/// Extracts any [`ArchiveSource`] and routes anomalies to `reporter`.
///
/// Pass `&mut reporter` to keep ownership of a stateful reporter.
///
/// # Errors
///
/// Same as [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use jarex_core::CollectingReporter;
/// use jarex_core::ExtractionConfig;
/// use jarex_core::Locator;
/// use jarex_core::extract_from_source;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut locator = Locator::parse("jar:file:///tmp/sample.jar!/")?;
/// let mut reporter = CollectingReporter::new();
/// let report = extract_from_source(
///     &mut locator,
///     "/tmp/robots",
///     &ExtractionConfig::default(),
///     &mut reporter,
/// )?;
/// assert_eq!(report.anomalies.len(), reporter.anomalies.len());
/// # Ok(())
/// # }
/// ```
pub fn extract_from_source<S, Q, A>(
    source: &mut S,
    output_dir: Q,
    config: &ExtractionConfig,
    reporter: A,
) -> Result<ExtractionReport>
where
    S: ArchiveSource + ?Sized,
    Q: AsRef<Path>,
    A: AnomalyReporter,
{
    let mut engine = ExtractionEngine::new(config.clone(), reporter);
    engine.extract(source, output_dir.as_ref())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::CollectingReporter;
    use crate::ExtractionError;
    use crate::ReaderSource;
    use crate::test_utils::create_test_zip;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_extract_archive_from_file() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("sample.jar");
        fs::write(&archive, create_test_zip(&[("sample/Walls.properties", "x=1")])).unwrap();
        let out = temp.path().join("robots");

        let report = extract_archive(&archive, &out, &ExtractionConfig::default()).unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(fs::read_to_string(out.join("sample/Walls.properties")).unwrap(), "x=1");
    }

    #[test]
    fn test_extract_archive_missing_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("robots");

        let result = extract_archive(temp.path().join("missing.jar"), &out, &ExtractionConfig::default());

        assert!(matches!(result, Err(ExtractionError::Io { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_extract_from_source_keeps_reporter() {
        let temp = TempDir::new().unwrap();
        let data = create_test_zip(&[("../x", "x"), ("y", "y")]);
        let mut source = ReaderSource::new(Cursor::new(data));
        let mut reporter = CollectingReporter::new();

        let report =
            extract_from_source(&mut source, temp.path(), &ExtractionConfig::default(), &mut reporter)
                .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(reporter.anomalies.len(), 1);
    }
}
