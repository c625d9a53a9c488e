//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use jarex_core::Anomaly;
use jarex_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct AnomalyOutput {
    entry_name: String,
    kind: String,
    message: String,
}

impl From<&Anomaly> for AnomalyOutput {
    fn from(anomaly: &Anomaly) -> Self {
        Self {
            entry_name: anomaly.entry_name.clone(),
            kind: anomaly.kind.to_string(),
            message: anomaly.message.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    entries_skipped: usize,
    extracted: Vec<String>,
    anomalies: Vec<AnomalyOutput>,
    duration_ms: u128,
}

impl From<&ExtractionReport> for ExtractionOutput {
    fn from(report: &ExtractionReport) -> Self {
        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            entries_skipped: report.entries_skipped,
            extracted: report
                .extracted
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            anomalies: report.anomalies.iter().map(AnomalyOutput::from).collect(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::from(report));
        Self::output(&output)
    }

    // Anomalies are part of the final document.
    fn format_anomaly(&self, _anomaly: &Anomaly) {}

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("extract", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
