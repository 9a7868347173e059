//! Command handlers - extracted from main.rs for testability
//!
//! Each handler probes through a [`ProbeSource`](media_parser::ProbeSource)
//! and writes its report to a caller-supplied writer, so tests can run
//! them against fixture probe documents.

pub mod analyze;
pub mod export;
pub mod parse;

pub use analyze::execute_analyze;
pub use export::execute_export;
pub use parse::execute_parse;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use media_parser::{Ffprobe, ReportOptions};

/// Report options for the configured output format.
#[must_use]
pub fn report_options(config: &CliConfig) -> ReportOptions {
    ReportOptions::default()
        .with_format(config.output_format)
        .with_verbose(config.verbosity.is_verbose())
}

/// Status reporter honouring the quiet and color settings.
#[must_use]
pub fn reporter(config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

/// Probe runner after checking that the binary starts.
pub fn installed_probe(config: &CliConfig) -> CliResult<Ffprobe> {
    let probe = config.probe();
    probe.check_installed()?;
    Ok(probe)
}

fn report_error(e: media_parser::MediaParserError) -> CliError {
    CliError::report_generation(e.to_string())
}
