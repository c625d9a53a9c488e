//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use jarex_core::Anomaly;
use jarex_core::AnomalyKind;
use jarex_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr() && console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const UNITS: [(&str, u64); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

        UNITS
            .iter()
            .find(|(_, scale)| bytes >= *scale)
            .map_or_else(
                || format!("{bytes} B"),
                |(unit, scale)| format!("{:.1} {unit}", bytes as f64 / *scale as f64),
            )
    }

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let head = digits.len() % 3;
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - head) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result
    }

    fn anomaly_line(&self, anomaly: &Anomaly) -> String {
        let label = match anomaly.kind {
            AnomalyKind::PathTraversal => "REJECTED",
            AnomalyKind::Io => "SKIPPED",
        };

        if !self.use_colors {
            return format!("{label}: {anomaly}");
        }

        let label = match anomaly.kind {
            AnomalyKind::PathTraversal => style(label).red().bold(),
            AnomalyKind::Io => style(label).yellow().bold(),
        };
        format!("{label} {anomaly}")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = if report.has_anomalies() {
            "Extraction complete with skipped entries"
        } else {
            "Extraction complete"
        };

        if self.use_colors {
            let mark = if report.has_anomalies() {
                style("!").yellow().bold()
            } else {
                style("✓").green().bold()
            };
            self.term.write_line(&format!("{mark} {headline}"))?;
        } else {
            self.term.write_line(headline)?;
        }

        self.term.write_line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ))?;
        self.term.write_line(&format!(
            "  Directories:     {}",
            Self::format_number(report.directories_created)
        ))?;
        self.term.write_line(&format!(
            "  Total size:      {}",
            Self::format_size(report.bytes_written)
        ))?;

        if report.entries_skipped > 0 {
            self.term.write_line(&format!(
                "  Entries skipped: {}",
                Self::format_number(report.entries_skipped)
            ))?;
        }

        if self.verbose {
            self.term
                .write_line(&format!("  Duration:        {:?}", report.duration))?;
            for path in &report.extracted {
                self.term.write_line(&format!("    {}", path.display()))?;
            }
        }

        Ok(())
    }

    fn format_anomaly(&self, anomaly: &Anomaly) {
        if self.quiet {
            return;
        }
        let _ = self.err_term.write_line(&self.anomaly_line(anomaly));
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> HumanFormatter {
        HumanFormatter {
            verbose: false,
            quiet: false,
            use_colors: false,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(HumanFormatter::format_size(1536 * 1024 * 1024), "1.5 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(12_345), "12,345");
        assert_eq!(HumanFormatter::format_number(123_456), "123,456");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_anomaly_line_without_colors() {
        let anomaly = Anomaly {
            entry_name: "../evil".to_string(),
            kind: AnomalyKind::PathTraversal,
            message: "path traversal detected: ../evil".to_string(),
        };

        let line = plain().anomaly_line(&anomaly);
        assert!(line.starts_with("REJECTED: "));
        assert!(line.contains("skipped entry '../evil'"));
    }
}
