//! `analyze` command: detailed report with detected problems.
//!
//! Orchestrates: probe metadata -> probe packets and frames -> detect -> render.

use super::{installed_probe, report_error, report_options, reporter};
use crate::commands::AnalyzeArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use media_parser::{
    AnalysisOptions, DetailedAnalysis, MediaAnalyzer, ProbeSource, Reporter, Severity,
    SeverityCounts,
};
use std::io::Write;

/// Analysis options for the analyze command.
pub fn analysis_options(args: &AnalyzeArgs) -> CliResult<AnalysisOptions> {
    if !args.bitrate_window.is_finite() || args.bitrate_window <= 0.0 {
        return Err(CliError::invalid_argument(format!(
            "--bitrate-window must be a positive number of seconds, got {}",
            args.bitrate_window
        )));
    }

    Ok(AnalysisOptions::new()
        .with_packets(!args.no_packets)
        .with_frames(!args.no_frames)
        .with_max_packets(args.max_packets)
        .with_max_frames(args.max_frames)
        .with_timeline_window(args.bitrate_window))
}

/// Number of Error and Critical findings.
#[must_use]
pub fn blocking_problems(analysis: &DetailedAnalysis) -> usize {
    analysis
        .problems
        .iter()
        .filter(|p| p.severity >= Severity::Critical)
        .count()
}

/// Execute the analyze command against ffprobe, printing to stdout.
pub fn execute_analyze(config: &CliConfig, args: &AnalyzeArgs) -> CliResult<()> {
    let options = analysis_options(args)?;
    let probe = installed_probe(config)?;
    let analyzer = MediaAnalyzer::new(probe, options);

    let mut progress = reporter(config);
    progress.start_spinner(&format!("Analyzing {}", args.input));
    let analysis = analyzer.analyze_with_details(&args.input);
    progress.finish();
    let analysis = analysis?;

    let stdout = std::io::stdout();
    render_analysis(config, &analysis, &mut stdout.lock())?;

    if config.verbosity.is_verbose() {
        progress.problem_summary(&SeverityCounts::from_findings(&analysis.problems));
    }
    check_strict(&analysis, args.strict)
}

/// Run the full analysis of `input` and render it to `out`.
pub fn run_analyze<S: ProbeSource, W: Write>(
    config: &CliConfig,
    analyzer: &MediaAnalyzer<S>,
    args: &AnalyzeArgs,
    out: &mut W,
) -> CliResult<DetailedAnalysis> {
    let analysis = analyzer.analyze_with_details(&args.input)?;
    render_analysis(config, &analysis, out)?;
    check_strict(&analysis, args.strict)?;
    Ok(analysis)
}

fn render_analysis<W: Write>(
    config: &CliConfig,
    analysis: &DetailedAnalysis,
    out: &mut W,
) -> CliResult<()> {
    Reporter::new(report_options(config))
        .print_detailed(out, analysis)
        .map_err(report_error)
}

fn check_strict(analysis: &DetailedAnalysis, strict: bool) -> CliResult<()> {
    let blocking = blocking_problems(analysis);
    if strict && blocking > 0 {
        return Err(CliError::analysis(format!(
            "{blocking} error or critical problem(s) detected in {}",
            analysis.media_info.input
        )));
    }
    Ok(())
}
