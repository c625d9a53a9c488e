//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::FormatterReporter;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use jarex_core::ErrorPolicy;
use jarex_core::ExtractionConfig;
use jarex_core::Locator;
use jarex_core::extract_from_source;
use std::env;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut locator = add_archive_context(Locator::parse(&args.source), &args.source)?;
    let config = build_config(args);

    let report = add_archive_context(
        extract_from_source(
            &mut locator,
            &output_dir,
            &config,
            FormatterReporter::new(formatter),
        ),
        &args.source,
    )?;

    formatter.format_extraction_result(&report)?;

    Ok(())
}

fn build_config(args: &ExtractArgs) -> ExtractionConfig {
    let policy = if args.fail_fast {
        ErrorPolicy::Abort
    } else {
        ErrorPolicy::Continue
    };

    let mut config = ExtractionConfig::default()
        .with_error_policy(policy)
        .with_extract_manifest(args.include_manifest);
    if let Some(size) = args.buffer_size {
        config = config.with_buffer_size(size);
    }
    config
}
