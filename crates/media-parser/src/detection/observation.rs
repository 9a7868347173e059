//! Packet, frame and bitrate observations consumed by the analyzers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream media type as reported by ffprobe's `codec_type`/`media_type`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Video stream
    Video,
    /// Audio stream
    Audio,
    /// Subtitle stream
    Subtitle,
    /// Data stream
    Data,
    /// Attachment (fonts, cover art)
    Attachment,
    /// Anything else
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Parse ffprobe's codec type string, case-insensitively.
    #[must_use]
    pub fn from_probe(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitle" => Self::Subtitle,
            "data" => Self::Data,
            "attachment" => Self::Attachment,
            _ => Self::Unknown,
        }
    }

    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Subtitle => "subtitle",
            Self::Data => "data",
            Self::Attachment => "attachment",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coded picture type of a video frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PictureType {
    /// Intra-coded
    I,
    /// Predicted
    P,
    /// Bi-directionally predicted
    B,
}

impl PictureType {
    /// Parse ffprobe's `pict_type`; `?`, `S`, `SI` and friends yield `None`.
    #[must_use]
    pub fn from_probe(value: &str) -> Option<Self> {
        match value.trim() {
            "I" | "i" => Some(Self::I),
            "P" | "p" => Some(Self::P),
            "B" | "b" => Some(Self::B),
            _ => None,
        }
    }

    /// Single-letter label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::P => "P",
            Self::B => "B",
        }
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One demuxed packet, in probe (transmission) order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PacketObservation {
    /// Presentation timestamp in seconds
    pub pts: f64,
    /// Decode timestamp in seconds
    pub dts: f64,
    /// Payload size in bytes
    pub size: u64,
    /// Index of the owning stream
    pub stream_index: usize,
    /// Media type of the owning stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_type: Option<MediaType>,
    /// Packet duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// ffprobe packet flags (`K_` for keyframes, `_D` for discard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

impl PacketObservation {
    /// Create a packet with the fields every analyzer reads.
    #[must_use]
    pub fn new(pts: f64, dts: f64, size: u64, stream_index: usize) -> Self {
        Self {
            pts,
            dts,
            size,
            stream_index,
            ..Self::default()
        }
    }

    /// Set the owning stream's media type.
    #[must_use]
    pub const fn with_codec_type(mut self, codec_type: MediaType) -> Self {
        self.codec_type = Some(codec_type);
        self
    }

    /// Set the packet duration.
    #[must_use]
    pub const fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }
}

/// One decoded frame, in probe order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Media type of the frame
    pub media_type: MediaType,
    /// Index of the owning stream
    pub stream_index: usize,
    /// Whether the frame is a keyframe
    pub key_frame: bool,
    /// Presentation timestamp in seconds
    pub pts: f64,
    /// Decode timestamp in seconds; zero when unknown
    pub dts: f64,
    /// Frame duration in seconds
    pub duration: f64,
    /// Coded size in bytes
    pub size: u64,
    /// Picture type (video only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pict_type: Option<PictureType>,
    /// Coded picture number (video only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_picture_number: Option<u64>,
    /// Width in pixels (video only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels (video only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Pixel format (video only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_fmt: Option<String>,
}

impl FrameObservation {
    /// Create a video frame.
    #[must_use]
    pub fn video(pts: f64, dts: f64, key_frame: bool) -> Self {
        Self {
            media_type: MediaType::Video,
            key_frame,
            pts,
            dts,
            ..Self::default()
        }
    }

    /// Set the picture type.
    #[must_use]
    pub const fn with_pict_type(mut self, pict_type: PictureType) -> Self {
        self.pict_type = Some(pict_type);
        self
    }

    /// Set the coded size.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Whether both this frame and `previous` carry a usable DTS.
    #[must_use]
    pub fn has_dts_with(&self, previous: &Self) -> bool {
        self.dts > 0.0 && previous.dts > 0.0
    }
}

/// Series a [`BitratePoint`] belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitrateKind {
    /// Video stream only
    Video,
    /// Audio stream only
    Audio,
    /// All packets
    #[default]
    Total,
}

/// Bitrate of one fixed-width window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BitratePoint {
    /// Window start in seconds
    pub time: f64,
    /// Bits per second
    pub bitrate: f64,
    /// Series tag
    #[serde(rename = "type")]
    pub kind: BitrateKind,
}
