//! `export` command: write the analysis as JSON files.

use super::{installed_probe, reporter};
use crate::commands::ExportArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use console::style;
use media_parser::{
    export_analysis, AnalysisOptions, ExportOptions, ExportSummary, ExportedFile, MediaAnalyzer,
    ProbeSource,
};
use std::io::Write;

/// Which files to write; `--export-all` enables every one.
#[must_use]
pub fn export_options(args: &ExportArgs) -> ExportOptions {
    if args.export_all {
        return ExportOptions::all();
    }
    ExportOptions::default()
        .with_packets(args.export_packets)
        .with_frames(args.export_frames)
        .with_problems(args.export_problems)
        .with_bitrate(args.export_bitrate)
}

/// Full analysis with the requested limits.
#[must_use]
pub fn analysis_options(args: &ExportArgs) -> AnalysisOptions {
    AnalysisOptions::new()
        .with_streams(true)
        .with_max_packets(args.max_packets)
        .with_max_frames(args.max_frames)
}

/// Status line for one written file.
#[must_use]
pub fn exported_line(file: &ExportedFile) -> String {
    match file.count {
        Some(count) => format!(
            "Exported {count} {} to {}",
            file.kind.label(),
            file.path.display()
        ),
        None => format!("Exported {} to {}", file.kind.label(), file.path.display()),
    }
}

/// Execute the export command against ffprobe.
pub fn execute_export(config: &CliConfig, args: &ExportArgs) -> CliResult<()> {
    let probe = installed_probe(config)?;
    let analyzer = MediaAnalyzer::new(probe, analysis_options(args));

    let mut progress = reporter(config);
    progress.start_spinner(&format!("Analyzing {}", args.input));
    let analysis = analyzer.analyze_with_details(&args.input);
    progress.finish();
    let analysis = analysis?;

    let summary = export_analysis(&args.dir, &args.input, &analysis, &export_options(args))?;
    if !config.verbosity.is_quiet() {
        let stdout = std::io::stdout();
        write_summary(&summary, config.color.should_color(), &mut stdout.lock())?;
    }
    Ok(())
}

/// Analyze `args.input` and export it, writing the status lines to `out`.
pub fn run_export<S: ProbeSource, W: Write>(
    analyzer: &MediaAnalyzer<S>,
    args: &ExportArgs,
    out: &mut W,
) -> CliResult<ExportSummary> {
    let analysis = analyzer.analyze_with_details(&args.input)?;
    let summary = export_analysis(&args.dir, &args.input, &analysis, &export_options(args))?;
    write_summary(&summary, false, out)?;
    Ok(summary)
}

fn write_summary<W: Write>(summary: &ExportSummary, use_color: bool, out: &mut W) -> CliResult<()> {
    let check = if use_color {
        style("✓").green().bold().to_string()
    } else {
        "✓".to_string()
    };

    for file in &summary.files {
        writeln!(out, "{check} {}", exported_line(file))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Analysis exported to: {}",
        summary.export_directory.display()
    )?;
    writeln!(out, "Total files created: {}", summary.files_written())?;
    Ok(())
}
