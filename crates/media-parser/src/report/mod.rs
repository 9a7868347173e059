//! Report rendering as text, JSON or YAML.

mod text;
mod units;

pub use units::{format_bitrate, format_duration, format_size};

use crate::media::{DetailedAnalysis, MediaInfo};
use crate::result::MediaParserResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Output format of a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl ReportFormat {
    /// Parse a format name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Like [`ReportFormat::from_name`], falling back to text for unknown names.
    #[must_use]
    pub fn from_name_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(format = name, "unknown output format, using text");
            Self::Text
        })
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Report rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Output format
    pub format: ReportFormat,
    /// Include probe score, colour details and info-level problems
    pub verbose: bool,
    /// Include the problems section of detailed reports
    pub show_problems: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            verbose: false,
            show_problems: true,
        }
    }
}

impl ReportOptions {
    /// Set the output format
    #[must_use]
    pub const fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable verbose output
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Show or hide problems
    #[must_use]
    pub const fn with_problems(mut self, show: bool) -> Self {
        self.show_problems = show;
        self
    }
}

/// Renders analysis results to any writer.
#[derive(Clone, Debug, Default)]
pub struct Reporter {
    options: ReportOptions,
}

impl Reporter {
    /// Create a reporter.
    #[must_use]
    pub const fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Render container and stream metadata.
    pub fn print_media_info<W: Write>(&self, out: &mut W, info: &MediaInfo) -> MediaParserResult<()> {
        match self.options.format {
            ReportFormat::Text => text::write_media_info(out, info, &self.options)?,
            ReportFormat::Json => write_json(out, info)?,
            ReportFormat::Yaml => write_yaml(out, info)?,
        }
        Ok(())
    }

    /// Render metadata followed by detected problems.
    pub fn print_detailed<W: Write>(
        &self,
        out: &mut W,
        analysis: &DetailedAnalysis,
    ) -> MediaParserResult<()> {
        match self.options.format {
            ReportFormat::Text => text::write_detailed(out, analysis, &self.options)?,
            ReportFormat::Json => write_json(out, analysis)?,
            ReportFormat::Yaml => write_yaml(out, analysis)?,
        }
        Ok(())
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> MediaParserResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_yaml<W: Write, T: Serialize>(out: &mut W, value: &T) -> MediaParserResult<()> {
    let yaml = serde_yaml_ng::to_string(value)?;
    out.write_all(yaml.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detection::{Category, Finding, FindingCode, Severity};
    use crate::media::{FormatInfo, StreamInfo, VideoInfo};

    fn sample_info() -> MediaInfo {
        let mut info = MediaInfo::new("movie.mp4");
        info.format = Some(FormatInfo {
            format_name: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
            format_long_name: "QuickTime / MOV".to_string(),
            duration: 120.5,
            size: 70_312_500,
            bitrate: 4_668_049,
            probe_score: 100,
            ..FormatInfo::default()
        });
        info.video = Some(VideoInfo {
            index: 0,
            codec: "h264".to_string(),
            codec_long_name: "H.264 / AVC".to_string(),
            profile: Some("High".to_string()),
            width: 1920,
            height: 1080,
            pixel_format: "yuv420p".to_string(),
            frame_rate: "24/1".to_string(),
            avg_frame_rate: "24/1".to_string(),
            color_space: Some("bt709".to_string()),
            ..VideoInfo::default()
        });
        info
    }

    fn sample_analysis() -> DetailedAnalysis {
        let mut analysis = DetailedAnalysis::new(sample_info());
        analysis.problems = vec![
            Finding::new(
                Severity::Info,
                Category::Compatibility,
                FindingCode::HevcSupport,
                "HEVC/H.265 codec requires modern devices for playback",
            ),
            Finding::new(
                Severity::Warning,
                Category::PacketLoss,
                FindingCode::PotentialPacketLoss,
                "Potential packet loss detected at 2.00s",
            )
            .with_details("PTS jump of 1.960s detected")
            .with_timestamp(2.0),
            Finding::new(
                Severity::Error,
                Category::Keyframe,
                FindingCode::NoKeyframes,
                "No or insufficient keyframes detected",
            ),
        ];
        analysis
    }

    fn render_detailed(options: ReportOptions) -> String {
        let mut buf = Vec::new();
        Reporter::new(options)
            .print_detailed(&mut buf, &sample_analysis())
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!(ReportFormat::from_name("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_name("yaml"), Some(ReportFormat::Yaml));
        assert_eq!(ReportFormat::from_name("xml"), None);
        assert_eq!(ReportFormat::from_name_lenient("xml"), ReportFormat::Text);
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_text_media_info_sections() {
        let mut buf = Vec::new();
        Reporter::default()
            .print_media_info(&mut buf, &sample_info())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("MEDIA ANALYSIS REPORT"));
        assert!(text.contains("Input: movie.mp4"));
        assert!(text.contains("CONTAINER FORMAT:"));
        assert!(text.contains("File Size:"));
        assert!(text.contains("67.06 MB"));
        assert!(text.contains("VIDEO STREAM:"));
        assert!(text.contains("1920x1080"));
        assert!(!text.contains("AUDIO STREAM:"));
        assert!(!text.contains("Probe Score"));
        assert!(!text.contains("Color Space"));
        assert!(!text.contains("Avg Frame Rate"));
    }

    #[test]
    fn test_verbose_adds_details() {
        let mut buf = Vec::new();
        Reporter::new(ReportOptions::default().with_verbose(true))
            .print_media_info(&mut buf, &sample_info())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Probe Score:"));
        assert!(text.contains("Color Space:"));
    }

    #[test]
    fn test_streams_table() {
        let mut info = sample_info();
        info.streams.push(StreamInfo {
            index: 0,
            stream_type: "video".to_string(),
            codec: "h264".to_string(),
            codec_type: "video".to_string(),
            ..StreamInfo::default()
        });
        let mut buf = Vec::new();
        Reporter::default().print_media_info(&mut buf, &info).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("ALL STREAMS:"));
        assert!(text.contains("Index  Type   Codec"));
    }

    #[test]
    fn test_problems_grouped_by_severity() {
        let text = render_detailed(ReportOptions::default());
        let errors = text.find("ERRORS:").unwrap();
        let warnings = text.find("WARNINGS:").unwrap();
        assert!(errors < warnings);
        assert!(text.contains("[NO_KEYFRAMES]"));
        assert!(text.contains("Timestamp:"));
        assert!(text.contains("2.00s"));
        assert!(!text.contains("[HEVC_SUPPORT]"));
        assert!(text.contains("Summary: 1 errors, 0 critical, 1 warnings, 1 info"));
    }

    #[test]
    fn test_verbose_includes_info_problems() {
        let text = render_detailed(ReportOptions::default().with_verbose(true));
        assert!(text.contains("INFO:"));
        assert!(text.contains("[HEVC_SUPPORT]"));
    }

    #[test]
    fn test_problems_hidden() {
        let text = render_detailed(ReportOptions::default().with_problems(false));
        assert!(!text.contains("DETECTED PROBLEMS"));
    }

    #[test]
    fn test_json_detailed_report() {
        let text = render_detailed(ReportOptions::default().with_format(ReportFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["media_info"]["input"], "movie.mp4");
        assert_eq!(value["problems"].as_array().unwrap().len(), 3);
        assert_eq!(value["problems"][1]["code"], "POTENTIAL_PACKET_LOSS");
        assert!(value.get("packets").is_none());
    }

    #[test]
    fn test_yaml_media_info() {
        let mut buf = Vec::new();
        Reporter::new(ReportOptions::default().with_format(ReportFormat::Yaml))
            .print_media_info(&mut buf, &sample_info())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("input: movie.mp4"));
        assert!(text.contains("codec: h264"));
    }
}
