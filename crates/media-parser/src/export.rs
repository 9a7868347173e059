//! Export of a detailed analysis to a directory of JSON files.
//!
//! Every export goes to a fresh `analysis_<YYYYMMDD_HHMMSS>` directory
//! under the chosen base directory, together with a `summary.json` that
//! records which files were written.

use crate::detection::{FrameObservation, MediaType, PictureType};
use crate::media::DetailedAnalysis;
use crate::result::{MediaParserError, MediaParserResult};
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of entries in a frame visualization timeline.
pub const MAX_TIMELINE_ENTRIES: usize = 1000;

/// Per-picture-type counts and GOP layout of the video frames.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameVisualization {
    /// Number of video frames
    pub total_frames: usize,
    /// PTS of the last video frame
    pub duration: f64,
    /// Frame count per picture type (`I`, `P`, `B`)
    pub frame_types: BTreeMap<String, usize>,
    /// One entry per group of pictures
    pub gop_structure: Vec<GopInfo>,
    /// Sampled per-frame entries
    pub timeline: Vec<FrameTimelineEntry>,
}

/// One group of pictures: a keyframe up to the frame before the next keyframe.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GopInfo {
    /// PTS of the first frame
    pub start_time: f64,
    /// PTS of the last frame
    pub end_time: f64,
    /// Frames in the group
    pub frame_count: usize,
    /// I-frames in the group
    pub i_frames: usize,
    /// P-frames in the group
    pub p_frames: usize,
    /// B-frames in the group
    pub b_frames: usize,
}

impl GopInfo {
    fn starting_at(start_time: f64) -> Self {
        Self {
            start_time,
            ..Self::default()
        }
    }

    fn add(&mut self, frame: &FrameObservation) {
        self.frame_count += 1;
        self.end_time = frame.pts;
        match frame.pict_type {
            Some(PictureType::I) => self.i_frames += 1,
            Some(PictureType::P) => self.p_frames += 1,
            Some(PictureType::B) => self.b_frames += 1,
            None => {}
        }
    }
}

/// Sampled frame for plotting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameTimelineEntry {
    /// PTS in seconds
    pub time: f64,
    /// Picture type, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<PictureType>,
    /// Coded size in bytes
    pub size: u64,
    /// Whether the frame is a keyframe
    pub key_frame: bool,
}

impl FrameVisualization {
    /// Build from probe-ordered frames; non-video frames are ignored.
    ///
    /// Returns `None` when there are no video frames.
    #[must_use]
    pub fn from_frames(frames: &[FrameObservation]) -> Option<Self> {
        let video: Vec<&FrameObservation> = frames
            .iter()
            .filter(|f| f.media_type == MediaType::Video)
            .collect();
        let first = video.first()?;
        let last = video.last()?;

        let stride = (video.len() / MAX_TIMELINE_ENTRIES).max(1);
        let mut frame_types = BTreeMap::new();
        let mut gop_structure = Vec::new();
        let mut timeline = Vec::new();
        let mut gop = GopInfo::starting_at(first.pts);

        for (i, frame) in video.iter().enumerate() {
            if let Some(pict_type) = frame.pict_type {
                *frame_types.entry(pict_type.to_string()).or_insert(0) += 1;
            }
            if i % stride == 0 {
                timeline.push(FrameTimelineEntry {
                    time: frame.pts,
                    frame_type: frame.pict_type,
                    size: frame.size,
                    key_frame: frame.key_frame,
                });
            }
            if frame.key_frame && gop.frame_count > 0 {
                gop_structure.push(std::mem::replace(&mut gop, GopInfo::starting_at(frame.pts)));
            }
            gop.add(frame);
        }
        gop_structure.push(gop);

        Some(Self {
            total_frames: video.len(),
            duration: last.pts,
            frame_types,
            gop_structure,
            timeline,
        })
    }
}

/// Which optional files to write. `media_info.json` and `summary.json`
/// are always written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write `packets.json`
    pub packets: bool,
    /// Write `frames.json` and `frame_visualization.json`
    pub frames: bool,
    /// Write `problems.json`
    pub problems: bool,
    /// Write `bitrate_timeline.json`
    pub bitrate: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            packets: false,
            frames: false,
            problems: true,
            bitrate: false,
        }
    }
}

impl ExportOptions {
    /// Every optional file.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            packets: true,
            frames: true,
            problems: true,
            bitrate: true,
        }
    }

    /// Export packets
    #[must_use]
    pub const fn with_packets(mut self, enabled: bool) -> Self {
        self.packets = enabled;
        self
    }

    /// Export frames and their visualization
    #[must_use]
    pub const fn with_frames(mut self, enabled: bool) -> Self {
        self.frames = enabled;
        self
    }

    /// Export problems
    #[must_use]
    pub const fn with_problems(mut self, enabled: bool) -> Self {
        self.problems = enabled;
        self
    }

    /// Export the bitrate timeline
    #[must_use]
    pub const fn with_bitrate(mut self, enabled: bool) -> Self {
        self.bitrate = enabled;
        self
    }
}

/// Kind of exported file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExportKind {
    /// `media_info.json`
    MediaInfo,
    /// `problems.json`
    Problems,
    /// `packets.json`
    Packets,
    /// `frames.json`
    Frames,
    /// `frame_visualization.json`
    FrameVisualization,
    /// `bitrate_timeline.json`
    BitrateTimeline,
}

impl ExportKind {
    /// Every optional and mandatory data file, in write order.
    pub const ALL: [Self; 6] = [
        Self::MediaInfo,
        Self::Problems,
        Self::Packets,
        Self::Frames,
        Self::FrameVisualization,
        Self::BitrateTimeline,
    ];

    /// File name inside the export directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MediaInfo => "media_info.json",
            Self::Problems => "problems.json",
            Self::Packets => "packets.json",
            Self::Frames => "frames.json",
            Self::FrameVisualization => "frame_visualization.json",
            Self::BitrateTimeline => "bitrate_timeline.json",
        }
    }

    /// Human label for progress output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MediaInfo => "media info",
            Self::Problems => "problems",
            Self::Packets => "packets",
            Self::Frames => "frames",
            Self::FrameVisualization => "frame visualization",
            Self::BitrateTimeline => "bitrate timeline",
        }
    }
}

/// One written file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    /// What the file holds
    pub kind: ExportKind,
    /// Full path
    pub path: PathBuf,
    /// Number of records for list-valued files
    pub count: Option<usize>,
}

/// Counts recorded in `summary.json`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportStatistics {
    /// Findings in the analysis
    pub problems_found: usize,
    /// Packets in the analysis
    pub packets_analyzed: usize,
    /// Frames in the analysis
    pub frames_analyzed: usize,
}

/// Result of an export; serialized as `summary.json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportSummary {
    /// Local time stamp used in the directory name
    pub analysis_timestamp: String,
    /// Analyzed input
    pub input_file: String,
    /// Directory the files were written to
    pub export_directory: PathBuf,
    /// File name to whether it was written
    pub files_created: BTreeMap<String, bool>,
    /// Analysis counts
    pub statistics: ExportStatistics,
    /// Written data files, in write order
    #[serde(skip)]
    pub files: Vec<ExportedFile>,
}

impl ExportSummary {
    /// Number of data files written, excluding `summary.json`.
    #[must_use]
    pub fn files_written(&self) -> usize {
        self.files.len()
    }
}

/// File name of the export summary.
pub const SUMMARY_FILE: &str = "summary.json";

/// Export `analysis` under `base_dir/analysis_<local time>`.
pub fn export_analysis(
    base_dir: &Path,
    input: &str,
    analysis: &DetailedAnalysis,
    options: &ExportOptions,
) -> MediaParserResult<ExportSummary> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    export_analysis_with_timestamp(base_dir, &timestamp, input, analysis, options)
}

/// Export into `base_dir/analysis_<timestamp>`.
pub fn export_analysis_with_timestamp(
    base_dir: &Path,
    timestamp: &str,
    input: &str,
    analysis: &DetailedAnalysis,
    options: &ExportOptions,
) -> MediaParserResult<ExportSummary> {
    let export_dir = base_dir.join(format!("analysis_{timestamp}"));
    fs::create_dir_all(&export_dir).map_err(|e| {
        MediaParserError::export(format!(
            "failed to create export directory {}: {e}",
            export_dir.display()
        ))
    })?;
    tracing::info!(dir = %export_dir.display(), "exporting analysis");

    let visualization = if options.frames {
        FrameVisualization::from_frames(&analysis.frames)
    } else {
        None
    };

    let mut files = Vec::new();
    let mut files_created = BTreeMap::new();

    for kind in ExportKind::ALL {
        let path = export_dir.join(kind.file_name());
        let count = match kind {
            ExportKind::MediaInfo => Some(write_json(&path, &analysis.media_info).map(|()| None)),
            ExportKind::Problems => (options.problems && !analysis.problems.is_empty())
                .then(|| write_json(&path, &analysis.problems).map(|()| Some(analysis.problems.len()))),
            ExportKind::Packets => (options.packets && !analysis.packets.is_empty())
                .then(|| write_json(&path, &analysis.packets).map(|()| Some(analysis.packets.len()))),
            ExportKind::Frames => (options.frames && !analysis.frames.is_empty())
                .then(|| write_json(&path, &analysis.frames).map(|()| Some(analysis.frames.len()))),
            ExportKind::FrameVisualization => visualization
                .as_ref()
                .map(|viz| write_json(&path, viz).map(|()| None)),
            ExportKind::BitrateTimeline => (options.bitrate && !analysis.bitrate_timeline.is_empty())
                .then(|| write_json(&path, &analysis.bitrate_timeline).map(|()| None)),
        }
        .transpose()?;

        let written = count.is_some();
        files_created.insert(kind.file_name().to_string(), written);
        if let Some(count) = count {
            files.push(ExportedFile { kind, path, count });
        }
    }

    let summary = ExportSummary {
        analysis_timestamp: timestamp.to_string(),
        input_file: input.to_string(),
        export_directory: export_dir.clone(),
        files_created,
        statistics: ExportStatistics {
            problems_found: analysis.problems.len(),
            packets_analyzed: analysis.packets.len(),
            frames_analyzed: analysis.frames.len(),
        },
        files,
    };
    write_json(&export_dir.join(SUMMARY_FILE), &summary)?;

    Ok(summary)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> MediaParserResult<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json).map_err(|e| {
        MediaParserError::export(format!("failed to write {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "wrote export file");
    Ok(())
}
