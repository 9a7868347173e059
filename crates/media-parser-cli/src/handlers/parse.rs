//! `parse` command: container and stream metadata.

use super::{installed_probe, report_error, report_options, reporter};
use crate::commands::ParseArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use media_parser::{AnalysisOptions, MediaAnalyzer, ProbeSource, Reporter};
use std::io::Write;

/// Metadata selection for the parse command; `--show-all` turns on every section.
#[must_use]
pub fn analysis_options(args: &ParseArgs) -> AnalysisOptions {
    if args.show_all {
        return AnalysisOptions::new()
            .with_video(true)
            .with_audio(true)
            .with_format(true)
            .with_streams(true);
    }
    AnalysisOptions::new()
        .with_video(args.show_video)
        .with_audio(args.show_audio)
        .with_format(args.show_format)
        .with_streams(args.show_streams)
}

/// Execute the parse command against ffprobe, printing to stdout.
pub fn execute_parse(config: &CliConfig, args: &ParseArgs) -> CliResult<()> {
    let probe = installed_probe(config)?;
    let analyzer = MediaAnalyzer::new(probe, analysis_options(args));

    let mut progress = reporter(config);
    progress.start_spinner(&format!("Probing {}", args.input));
    let stdout = std::io::stdout();
    let result = run_parse(config, &analyzer, &args.input, &mut stdout.lock());
    progress.finish();
    result
}

/// Probe `input` and render its metadata to `out`.
pub fn run_parse<S: ProbeSource, W: Write>(
    config: &CliConfig,
    analyzer: &MediaAnalyzer<S>,
    input: &str,
    out: &mut W,
) -> CliResult<()> {
    let info = analyzer.analyze(input)?;
    Reporter::new(report_options(config))
        .print_media_info(out, &info)
        .map_err(report_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::fixtures::{clean_source, MP4_H264};
    use media_parser::ReportFormat;

    fn args(show_audio: bool, show_streams: bool, show_all: bool) -> ParseArgs {
        ParseArgs {
            input: "movie.mp4".to_string(),
            show_video: true,
            show_audio,
            show_format: true,
            show_streams,
            show_all,
        }
    }

    fn render(config: &CliConfig, args: &ParseArgs) -> String {
        let analyzer = MediaAnalyzer::new(clean_source(MP4_H264), analysis_options(args));
        let mut out = Vec::new();
        run_parse(config, &analyzer, &args.input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_analysis_options_follow_flags() {
        let options = analysis_options(&args(false, true, false));
        assert!(options.show_video);
        assert!(!options.show_audio);
        assert!(options.show_streams);
    }

    #[test]
    fn test_show_all_overrides_flags() {
        let mut parse = args(false, false, true);
        parse.show_video = false;
        let options = analysis_options(&parse);
        assert!(options.show_video && options.show_audio && options.show_format);
        assert!(options.show_streams);
    }

    #[test]
    fn test_text_report() {
        let text = render(&CliConfig::new(), &args(true, false, false));
        assert!(text.contains("MEDIA ANALYSIS REPORT"));
        assert!(text.contains("VIDEO STREAM:"));
        assert!(text.contains("AUDIO STREAM:"));
        assert!(!text.contains("ALL STREAMS:"));
        assert!(!text.contains("DETECTED PROBLEMS"));
    }

    #[test]
    fn test_audio_hidden() {
        let text = render(&CliConfig::new(), &args(false, true, false));
        assert!(!text.contains("AUDIO STREAM:"));
        assert!(text.contains("ALL STREAMS:"));
    }

    #[test]
    fn test_json_report() {
        let config = CliConfig::new().with_output_format(ReportFormat::Json);
        let text = render(&config, &args(true, false, false));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["input"], "movie.mp4");
        assert_eq!(value["video"]["codec"], "h264");
        assert_eq!(value["audio"]["codec"], "aac");
    }
}
