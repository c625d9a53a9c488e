//! Core extraction engine.

use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::Anomaly;
use crate::AnomalyReporter;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::formats::IndexedJarReader;
use crate::formats::JarReader;
use crate::formats::ManifestFilter;
use crate::formats::jar::read_error;
use crate::source::ArchiveSource;
use crate::source::ArchiveStream;
use crate::types::ArchiveEntry;
use crate::types::DestDir;

use super::materialize::create_directory;
use super::materialize::write_file;

/// Main extraction engine.
///
/// Drives one pass over an archive: every entry is validated against the
/// destination root and materialized in archive order. Per-entry failures
/// go to the reporter and into the report, or abort the run under
/// [`ErrorPolicy::Abort`](crate::ErrorPolicy::Abort).
pub struct ExtractionEngine<A> {
    config: ExtractionConfig,
    reporter: A,
}

impl<A: AnomalyReporter> ExtractionEngine<A> {
    /// Creates a new extraction engine with the given configuration and
    /// anomaly reporter.
    #[must_use]
    pub fn new(config: ExtractionConfig, reporter: A) -> Self {
        Self { config, reporter }
    }

    /// Extracts `source` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` before touching anything if the configuration
    /// is unusable. Returns errors opening the source or the destination,
    /// stream-level errors (`Source`, `InvalidArchive`) and, under the abort
    /// policy, the first per-entry error. Everything already materialized
    /// stays on disk.
    pub fn extract<S>(&mut self, source: &mut S, output_dir: &Path) -> Result<ExtractionReport>
    where
        S: ArchiveSource + ?Sized,
    {
        let start = Instant::now();
        self.config.validate()?;

        let description = source.describe();
        let stream = source.open()?;
        let dest = self.open_destination(output_dir)?;

        log::debug!(
            target: "jarex",
            "extracting {description} into {}",
            dest.as_path().display()
        );

        let mut pass = Pass {
            dest: &dest,
            buffer: CopyBuffer::with_size(self.config.buffer_size),
            manifest: ManifestFilter::new(!self.config.extract_manifest),
            report: ExtractionReport::new(),
        };

        match stream {
            ArchiveStream::Seekable(inner) => {
                let mut reader = IndexedJarReader::new(inner)?;
                while let Some(mut entry) = reader.next_entry()? {
                    self.process_entry(&mut pass, &mut entry)?;
                }
            }
            ArchiveStream::Sequential(inner) => {
                let mut reader = JarReader::new(BufReader::new(inner));
                while let Some(mut entry) = reader.next_entry()? {
                    self.process_entry(&mut pass, &mut entry)?;
                }
            }
        }

        let mut report = pass.report;
        report.duration = start.elapsed();
        log::debug!(
            target: "jarex",
            "extracted {} files and {} directories from {description} ({} skipped)",
            report.files_extracted,
            report.directories_created,
            report.entries_skipped
        );

        Ok(report)
    }

    /// Returns the reporter, e.g. to inspect collected anomalies.
    pub fn reporter(&self) -> &A {
        &self.reporter
    }

    /// Consumes the engine and returns the reporter.
    pub fn into_reporter(self) -> A {
        self.reporter
    }

    /// Handles one entry: skips leading JAR metadata, materializes the rest
    /// and leaves the entry fully read.
    fn process_entry<D: Read>(
        &mut self,
        pass: &mut Pass<'_>,
        entry: &mut ArchiveEntry<D>,
    ) -> Result<()> {
        if pass.manifest.consumes(&entry.name) {
            log::trace!(target: "jarex", "consumed JAR metadata entry '{}'", entry.name);
            return drain(entry);
        }

        match materialize(pass.dest, entry, &mut pass.buffer, &mut pass.report) {
            Ok(()) => drain(entry),
            Err(err) if !err.is_recoverable() || self.config.is_fail_fast() => Err(err),
            Err(err) => {
                drain(entry)?;
                self.record(&entry.name, err, &mut pass.report)
            }
        }
    }

    fn open_destination(&self, output_dir: &Path) -> Result<DestDir> {
        if self.config.create_destination {
            DestDir::create(output_dir)
        } else {
            DestDir::new(output_dir)
        }
    }

    fn record(
        &mut self,
        entry_name: &str,
        err: ExtractionError,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let Some(anomaly) = Anomaly::from_error(entry_name, &err) else {
            return Err(err);
        };
        self.reporter.report(&anomaly);
        report.record_anomaly(anomaly);
        Ok(())
    }
}

/// State carried across the entries of one extraction.
struct Pass<'a> {
    dest: &'a DestDir,
    buffer: CopyBuffer,
    manifest: ManifestFilter,
    report: ExtractionReport,
}

fn materialize<D: Read>(
    dest: &DestDir,
    entry: &mut ArchiveEntry<D>,
    buffer: &mut CopyBuffer,
    report: &mut ExtractionReport,
) -> Result<()> {
    let resolved = if entry.is_dir {
        let resolved = create_directory(dest, &entry.name)?;
        report.directories_created += 1;
        resolved
    } else {
        let (resolved, written) = write_file(dest, entry, buffer)?;
        report.files_extracted += 1;
        report.bytes_written += written;
        resolved
    };

    log::trace!(target: "jarex", "extracted '{}'", entry.name);
    report
        .extracted
        .push(resolved.relative_to(dest).to_path_buf());
    Ok(())
}

/// Skips whatever is left of the entry's data so the next header is read
/// from the right position.
fn drain<D: Read>(entry: &mut ArchiveEntry<D>) -> Result<()> {
    io::copy(&mut entry.data, &mut io::sink())
        .map(drop)
        .map_err(read_error)
}
