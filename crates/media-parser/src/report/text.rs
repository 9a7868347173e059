//! Plain-text report layout.

use super::units::{format_bitrate, format_duration, format_size};
use super::ReportOptions;
use crate::detection::{Finding, Severity, SeverityCounts};
use crate::media::{AudioInfo, DetailedAnalysis, FormatInfo, MediaInfo, StreamInfo, VideoInfo};
use chrono::SecondsFormat;
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 40;
const MAX_TAGS_WIDTH: usize = 50;

/// Rows whose cells are padded so columns line up, two spaces apart.
#[derive(Default)]
struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    fn row<const N: usize>(&mut self, cells: [String; N]) {
        self.rows.push(cells.into());
    }

    fn pair(&mut self, label: &str, value: impl Into<String>) {
        self.row([format!("{label}:"), value.into()]);
    }

    fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(c))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in &self.rows {
            let mut line = String::new();
            for (c, cell) in row.iter().enumerate() {
                if c + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    let pad = widths[c] + 2 - cell.chars().count();
                    line.push_str(cell);
                    line.push_str(&" ".repeat(pad));
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}:")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

pub(super) fn write_media_info(
    out: &mut dyn Write,
    info: &MediaInfo,
    options: &ReportOptions,
) -> io::Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{banner}")?;
    writeln!(out, "MEDIA ANALYSIS REPORT")?;
    writeln!(
        out,
        "Analyzed at: {}",
        info.analyzed_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "Input: {}", info.input)?;
    writeln!(out, "{banner}")?;

    if let Some(format) = &info.format {
        section(out, "CONTAINER FORMAT")?;
        format_table(format, options.verbose).write(out)?;
    }
    if let Some(video) = &info.video {
        section(out, "VIDEO STREAM")?;
        video_table(video, options.verbose).write(out)?;
    }
    if let Some(audio) = &info.audio {
        section(out, "AUDIO STREAM")?;
        audio_table(audio).write(out)?;
    }
    if !info.streams.is_empty() {
        section(out, "ALL STREAMS")?;
        streams_table(&info.streams).write(out)?;
    }

    writeln!(out, "{banner}")
}

pub(super) fn write_detailed(
    out: &mut dyn Write,
    analysis: &DetailedAnalysis,
    options: &ReportOptions,
) -> io::Result<()> {
    write_media_info(out, &analysis.media_info, options)?;

    if options.show_problems && !analysis.problems.is_empty() {
        section(out, "DETECTED PROBLEMS")?;
        write_problems(out, &analysis.problems, options.verbose)?;
    }
    Ok(())
}

fn format_table(format: &FormatInfo, verbose: bool) -> Table {
    let mut table = Table::default();
    table.pair("Format", &format.format_name);
    table.pair("Long Name", &format.format_long_name);
    if format.duration > 0.0 {
        table.pair("Duration", format_duration(format.duration));
    }
    if format.size > 0 {
        table.pair("File Size", format_size(format.size));
    }
    if format.bitrate > 0 {
        table.pair("Overall Bitrate", format_bitrate(format.bitrate));
    }
    if verbose && format.probe_score > 0 {
        table.pair("Probe Score", format.probe_score.to_string());
    }
    table
}

fn video_table(video: &VideoInfo, verbose: bool) -> Table {
    let mut table = Table::default();
    table.pair("Stream Index", video.index.to_string());
    table.pair("Codec", format!("{} ({})", video.codec, video.codec_long_name));
    if let Some(profile) = &video.profile {
        table.pair("Profile", profile);
    }
    table.pair("Resolution", format!("{}x{}", video.width, video.height));
    if !video.aspect_ratio.is_empty() {
        table.pair("Aspect Ratio", &video.aspect_ratio);
    }
    table.pair("Pixel Format", &video.pixel_format);
    table.pair("Frame Rate", format!("{} fps", video.frame_rate));
    if !video.avg_frame_rate.is_empty() && video.avg_frame_rate != video.frame_rate {
        table.pair("Avg Frame Rate", format!("{} fps", video.avg_frame_rate));
    }
    if let Some(bitrate) = video.bitrate.filter(|b| *b > 0) {
        table.pair("Bitrate", format_bitrate(bitrate));
    }
    if let Some(duration) = video.duration.filter(|d| *d > 0.0) {
        table.pair("Duration", format_duration(duration));
    }
    if let Some(frames) = video.frame_count.filter(|n| *n > 0) {
        table.pair("Total Frames", frames.to_string());
    }
    if verbose {
        if let Some(space) = &video.color_space {
            table.pair("Color Space", space);
        }
        if let Some(primaries) = &video.color_primaries {
            table.pair("Color Primaries", primaries);
        }
        if let Some(transfer) = &video.color_transfer {
            table.pair("Color Transfer", transfer);
        }
        if let Some(depth) = video.has_b_frames.filter(|n| *n > 0) {
            table.pair("Has B-Frames", depth.to_string());
        }
    }
    table
}

fn audio_table(audio: &AudioInfo) -> Table {
    let mut table = Table::default();
    table.pair("Stream Index", audio.index.to_string());
    table.pair("Codec", format!("{} ({})", audio.codec, audio.codec_long_name));
    if let Some(profile) = &audio.profile {
        table.pair("Profile", profile);
    }
    table.pair("Channels", audio.channels.to_string());
    if !audio.channel_layout.is_empty() {
        table.pair("Channel Layout", &audio.channel_layout);
    }
    table.pair("Sample Rate", format!("{} Hz", audio.sample_rate));
    table.pair("Sample Format", &audio.sample_format);
    if let Some(bitrate) = audio.bitrate.filter(|b| *b > 0) {
        table.pair("Bitrate", format_bitrate(bitrate));
    }
    if let Some(duration) = audio.duration.filter(|d| *d > 0.0) {
        table.pair("Duration", format_duration(duration));
    }
    table
}

fn streams_table(streams: &[StreamInfo]) -> Table {
    let mut table = Table::default();
    table.row(["Index".into(), "Type".into(), "Codec".into(), "Tags".into()]);
    table.row(["-----".into(), "----".into(), "-----".into(), "----".into()]);
    for stream in streams {
        let mut tags = stream
            .tags
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        if tags.chars().count() > MAX_TAGS_WIDTH {
            tags = tags.chars().take(MAX_TAGS_WIDTH - 3).collect::<String>() + "...";
        }
        table.row([
            stream.index.to_string(),
            stream.stream_type.clone(),
            stream.codec.clone(),
            tags,
        ]);
    }
    table
}

const fn group_heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERRORS",
        Severity::Critical => "CRITICAL",
        Severity::Warning => "WARNINGS",
        Severity::Info => "INFO",
    }
}

fn write_problems(out: &mut dyn Write, problems: &[Finding], verbose: bool) -> io::Result<()> {
    for severity in Severity::BY_ATTENTION {
        if severity == Severity::Info && !verbose {
            continue;
        }
        let group: Vec<&Finding> = problems.iter().filter(|p| p.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        writeln!(out, "\n{}:", group_heading(severity))?;
        for problem in group {
            write_problem(out, problem)?;
        }
    }

    let counts = SeverityCounts::from_findings(problems);
    writeln!(out, "\n{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Summary: {} errors, {} critical, {} warnings, {} info",
        counts.errors, counts.critical, counts.warnings, counts.info
    )
}

fn write_problem(out: &mut dyn Write, problem: &Finding) -> io::Result<()> {
    let mut table = Table::default();
    table.row([format!("  [{}]", problem.code), problem.message.clone()]);
    if let Some(details) = &problem.details {
        table.pair("    Details", details);
    }
    if let Some(suggestion) = &problem.suggestion {
        table.pair("    Suggestion", suggestion);
    }
    if let Some(at) = problem.timestamp.filter(|t| *t > 0.0) {
        table.pair("    Timestamp", format!("{at:.2}s"));
    }
    table.write(out)?;
    writeln!(out)
}
