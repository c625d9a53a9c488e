//! Output formatting module.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use jarex_core::Anomaly;
use jarex_core::AnomalyReporter;
use json::JsonFormatter;

/// Creates an output formatter based on CLI flags
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose, quiet))
    }
}

/// Routes anomalies from the extraction engine to the active formatter
pub struct FormatterReporter<'a> {
    formatter: &'a dyn OutputFormatter,
}

impl<'a> FormatterReporter<'a> {
    pub fn new(formatter: &'a dyn OutputFormatter) -> Self {
        Self { formatter }
    }
}

impl AnomalyReporter for FormatterReporter<'_> {
    fn report(&mut self, anomaly: &Anomaly) {
        self.formatter.format_anomaly(anomaly);
    }
}
