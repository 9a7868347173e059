//! Typed media metadata produced by the analyzer pipeline.

use crate::detection::{BitratePoint, Finding, FrameObservation, PacketObservation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata of one probed input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Input path or URL as given
    pub input: String,
    /// Container information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatInfo>,
    /// First video stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoInfo>,
    /// First audio stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioInfo>,
    /// Every stream, when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<StreamInfo>,
    /// When the probe ran
    pub analyzed_at: DateTime<Utc>,
}

impl MediaInfo {
    /// Empty metadata for `input`, stamped now.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            format: None,
            video: None,
            audio: None,
            streams: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    /// Container name used for compatibility checks: the first entry of
    /// ffprobe's comma-separated `format_name` (`matroska,webm` → `matroska`).
    #[must_use]
    pub fn container_name(&self) -> &str {
        self.format
            .as_ref()
            .and_then(|f| f.format_name.split(',').next())
            .unwrap_or_default()
            .trim()
    }
}

/// Container-level information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Short format name(s), e.g. `mov,mp4,m4a,3gp,3g2,mj2`
    pub format_name: String,
    /// Descriptive format name
    pub format_long_name: String,
    /// Duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
    /// Overall bitrate in bits per second
    pub bitrate: u64,
    /// Probe confidence (0-100)
    pub probe_score: i32,
    /// Container tags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Video stream information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Stream index
    pub index: usize,
    /// Codec short name
    pub codec: String,
    /// Codec descriptive name
    pub codec_long_name: String,
    /// Codec profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Display aspect ratio, e.g. `16:9`
    pub aspect_ratio: String,
    /// Pixel format
    pub pixel_format: String,
    /// Real base frame rate as a fraction, e.g. `30000/1001`
    pub frame_rate: String,
    /// Average frame rate as a fraction
    pub avg_frame_rate: String,
    /// Stream bitrate in bits per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    /// Stream duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Frame count from the container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<u64>,
    /// Codec level as `major * 10 + minor`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    /// Colour space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    /// Colour primaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_primaries: Option<String>,
    /// Transfer characteristics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_transfer: Option<String>,
    /// B-frame reorder depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_b_frames: Option<u32>,
}

/// Audio stream information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Stream index
    pub index: usize,
    /// Codec short name
    pub codec: String,
    /// Codec descriptive name
    pub codec_long_name: String,
    /// Codec profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Channel count
    pub channels: u32,
    /// Channel layout, e.g. `stereo`
    pub channel_layout: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Sample format, e.g. `fltp`
    pub sample_format: String,
    /// Stream bitrate in bits per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    /// Stream duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Summary of any stream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream index
    pub index: usize,
    /// Stream type label
    #[serde(rename = "type")]
    pub stream_type: String,
    /// Codec short name
    pub codec: String,
    /// ffprobe codec type
    pub codec_type: String,
    /// Stream tags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Metadata plus packet/frame observations and detected problems.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    /// Probe metadata
    pub media_info: MediaInfo,
    /// Findings in detection order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<Finding>,
    /// Packets, truncated to the configured limit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packets: Vec<PacketObservation>,
    /// Frames, truncated to the configured limit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameObservation>,
    /// Total bitrate per window
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bitrate_timeline: Vec<BitratePoint>,
}

impl DetailedAnalysis {
    /// Wrap metadata with no observations.
    #[must_use]
    pub fn new(media_info: MediaInfo) -> Self {
        Self {
            media_info,
            problems: Vec::new(),
            packets: Vec::new(),
            frames: Vec::new(),
            bitrate_timeline: Vec::new(),
        }
    }
}
