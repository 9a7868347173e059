//! media-parser: ffprobe-backed media diagnostics
//!
//! ## Usage
//!
//! ```bash
//! media-parser parse movie.mp4 --show-streams   # Container and stream metadata
//! media-parser analyze stream.ts --strict       # Detect problems, fail on errors
//! media-parser -o json analyze movie.mkv        # Machine-readable report
//! media-parser export movie.mp4 --export-all    # Write JSON files for tooling
//! ```

use clap::Parser;
use media_parser_cli::{
    handlers::{execute_analyze, execute_export, execute_parse},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    logging::init(config.verbosity, config.color.should_color());
    tracing::debug!(?config, "starting");

    match &cli.command {
        Commands::Parse(args) => execute_parse(&config, args),
        Commands::Analyze(args) => execute_analyze(&config, args),
        Commands::Export(args) => execute_export(&config, args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_output_format(cli.output.into())
        .with_ffprobe(&cli.ffprobe)
        .with_timeout(Duration::from_secs(cli.timeout))
}
