//! Raw ffprobe JSON documents.
//!
//! ffprobe prints most numeric values as strings and uses `N/A` for
//! unknowns, so those fields stay textual here and are parsed during
//! conversion.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Output of `-show_format -show_streams`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProbeData {
    /// Streams in index order
    #[serde(default)]
    pub streams: Vec<RawStream>,
    /// Container section
    #[serde(default)]
    pub format: Option<RawFormat>,
}

/// One entry of the `streams` array.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStream {
    pub index: usize,
    pub codec_name: Option<String>,
    pub codec_long_name: Option<String>,
    pub profile: Option<String>,
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub has_b_frames: Option<u32>,
    pub pix_fmt: Option<String>,
    pub level: Option<i32>,
    pub color_space: Option<String>,
    pub color_transfer: Option<String>,
    pub color_primaries: Option<String>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    pub display_aspect_ratio: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    pub nb_frames: Option<String>,
    pub sample_fmt: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
    pub channel_layout: Option<String>,
    pub tags: BTreeMap<String, String>,
}

/// The `format` section.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawFormat {
    pub filename: Option<String>,
    pub nb_streams: Option<u32>,
    pub format_name: Option<String>,
    pub format_long_name: Option<String>,
    pub duration: Option<String>,
    pub size: Option<String>,
    pub bit_rate: Option<String>,
    pub probe_score: Option<i32>,
    pub tags: BTreeMap<String, String>,
}

/// Output of `-show_packets`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PacketsData {
    /// Packets in demux order
    #[serde(default)]
    pub packets: Vec<RawPacket>,
}

/// One entry of the `packets` array.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPacket {
    pub codec_type: Option<String>,
    pub stream_index: usize,
    pub pts_time: Option<String>,
    pub dts_time: Option<String>,
    pub duration_time: Option<String>,
    pub size: Option<String>,
    pub pos: Option<String>,
    pub flags: Option<String>,
}

/// Output of `-show_frames`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FramesData {
    /// Frames in decode output order
    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

/// One entry of the `frames` array.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawFrame {
    pub media_type: Option<String>,
    pub stream_index: usize,
    /// `1` for keyframes
    pub key_frame: i32,
    pub pts_time: Option<String>,
    pub dts_time: Option<String>,
    /// Frame DTS as printed by most ffprobe builds
    pub pkt_dts_time: Option<String>,
    pub duration_time: Option<String>,
    /// Deprecated spelling of `duration_time`, still printed by some builds
    pub pkt_duration_time: Option<String>,
    pub pkt_size: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub pix_fmt: Option<String>,
    pub pict_type: Option<String>,
    pub coded_picture_number: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_data_tolerates_missing_sections() {
        let data: ProbeData = serde_json::from_str("{}").unwrap();
        assert!(data.streams.is_empty());
        assert!(data.format.is_none());
    }

    #[test]
    fn test_stream_ignores_unknown_fields() {
        let json = r#"{"index": 0, "codec_type": "video", "refs": 1, "is_avc": "true"}"#;
        let stream: RawStream = serde_json::from_str(json).unwrap();
        assert_eq!(stream.codec_type.as_deref(), Some("video"));
    }

    #[test]
    fn test_frame_accepts_both_duration_spellings() {
        let json = r#"{
            "media_type": "video",
            "key_frame": 1,
            "pkt_dts_time": "0.040000",
            "pkt_duration_time": "0.040000",
            "duration_time": "0.040000"
        }"#;
        let frame: RawFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.pkt_dts_time.as_deref(), Some("0.040000"));
        assert!(frame.dts_time.is_none());
        assert_eq!(frame.key_frame, 1);
    }
}
