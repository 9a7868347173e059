//! CLI command definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use media_parser::probe::DEFAULT_FFPROBE_BINARY;
use media_parser::ReportFormat;
use std::path::PathBuf;

/// media-parser: probe media files with ffprobe and detect stream problems
#[derive(Parser, Debug)]
#[command(name = "media-parser")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Report format
    #[arg(short, long, default_value = "text", global = true)]
    pub output: OutputArg,

    /// Path to the ffprobe binary
    #[arg(long, env = "MEDIA_PARSER_FFPROBE", default_value = DEFAULT_FFPROBE_BINARY, global = true)]
    pub ffprobe: PathBuf,

    /// Probe timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print container and stream metadata
    Parse(ParseArgs),

    /// Analyze packets and frames for problems
    Analyze(AnalyzeArgs),

    /// Export analysis results as JSON files
    Export(ExportArgs),
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Media file or stream URL
    pub input: String,

    /// Show the video stream
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub show_video: bool,

    /// Show the audio stream
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub show_audio: bool,

    /// Show container format information
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub show_format: bool,

    /// Show every stream
    #[arg(long)]
    pub show_streams: bool,

    /// Show everything
    #[arg(long)]
    pub show_all: bool,
}

/// Arguments for the analyze command
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Media file or stream URL
    pub input: String,

    /// Maximum packets to analyze (0 = unlimited)
    #[arg(long, default_value = "10000")]
    pub max_packets: usize,

    /// Maximum frames to analyze (0 = unlimited)
    #[arg(long, default_value = "5000")]
    pub max_frames: usize,

    /// Skip packet analysis
    #[arg(long)]
    pub no_packets: bool,

    /// Skip frame analysis
    #[arg(long)]
    pub no_frames: bool,

    /// Bitrate timeline window in seconds
    #[arg(long, default_value = "1.0")]
    pub bitrate_window: f64,

    /// Exit with failure when any error or critical problem is found
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Media file or stream URL
    pub input: String,

    /// Base directory for the export
    #[arg(short, long, default_value = "./media-analysis")]
    pub dir: PathBuf,

    /// Export packet data
    #[arg(long)]
    pub export_packets: bool,

    /// Export frame data and the frame visualization
    #[arg(long)]
    pub export_frames: bool,

    /// Export detected problems
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub export_problems: bool,

    /// Export the bitrate timeline
    #[arg(long)]
    pub export_bitrate: bool,

    /// Export everything
    #[arg(long)]
    pub export_all: bool,

    /// Maximum packets to analyze (0 = unlimited)
    #[arg(long, default_value = "10000")]
    pub max_packets: usize,

    /// Maximum frames to analyze (0 = unlimited)
    #[arg(long, default_value = "5000")]
    pub max_frames: usize,
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Report format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputArg {
    /// Aligned text tables
    #[default]
    Text,
    /// Pretty JSON
    Json,
    /// YAML
    #[value(alias = "yml")]
    Yaml,
}

impl From<OutputArg> for ReportFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => Self::Text,
            OutputArg::Json => Self::Json,
            OutputArg::Yaml => Self::Yaml,
        }
    }
}
