//! Conversion from raw ffprobe documents to typed metadata and observations.

use super::schema::{RawFormat, RawFrame, RawPacket, RawStream};
use crate::detection::{FrameObservation, MediaType, PacketObservation, PictureType};
use crate::media::{AudioInfo, FormatInfo, StreamInfo, VideoInfo};
use std::str::FromStr;

/// Parse a textual ffprobe number; `N/A`, empty and malformed values yield `None`.
pub(crate) fn parse_number<T: FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "N/A")
        .and_then(|v| v.parse().ok())
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Container section to [`FormatInfo`].
#[must_use]
pub fn format_info(format: &RawFormat) -> FormatInfo {
    FormatInfo {
        format_name: text(format.format_name.as_ref()),
        format_long_name: text(format.format_long_name.as_ref()),
        duration: parse_number(format.duration.as_deref()).unwrap_or(0.0),
        size: parse_number(format.size.as_deref()).unwrap_or(0),
        bitrate: parse_number(format.bit_rate.as_deref()).unwrap_or(0),
        probe_score: format.probe_score.unwrap_or(0),
        tags: format.tags.clone(),
    }
}

/// Video stream to [`VideoInfo`].
#[must_use]
pub fn video_info(stream: &RawStream) -> VideoInfo {
    VideoInfo {
        index: stream.index,
        codec: text(stream.codec_name.as_ref()),
        codec_long_name: text(stream.codec_long_name.as_ref()),
        profile: non_empty(stream.profile.as_ref()),
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        aspect_ratio: text(stream.display_aspect_ratio.as_ref()),
        pixel_format: text(stream.pix_fmt.as_ref()),
        frame_rate: text(stream.r_frame_rate.as_ref()),
        avg_frame_rate: text(stream.avg_frame_rate.as_ref()),
        bitrate: parse_number(stream.bit_rate.as_deref()),
        duration: parse_number(stream.duration.as_deref()),
        frame_count: parse_number(stream.nb_frames.as_deref()),
        level: stream.level,
        color_space: non_empty(stream.color_space.as_ref()),
        color_primaries: non_empty(stream.color_primaries.as_ref()),
        color_transfer: non_empty(stream.color_transfer.as_ref()),
        has_b_frames: stream.has_b_frames,
    }
}

/// Audio stream to [`AudioInfo`].
#[must_use]
pub fn audio_info(stream: &RawStream) -> AudioInfo {
    AudioInfo {
        index: stream.index,
        codec: text(stream.codec_name.as_ref()),
        codec_long_name: text(stream.codec_long_name.as_ref()),
        profile: non_empty(stream.profile.as_ref()),
        channels: stream.channels.unwrap_or(0),
        channel_layout: text(stream.channel_layout.as_ref()),
        sample_rate: parse_number(stream.sample_rate.as_deref()).unwrap_or(0),
        sample_format: text(stream.sample_fmt.as_ref()),
        bitrate: parse_number(stream.bit_rate.as_deref()),
        duration: parse_number(stream.duration.as_deref()),
    }
}

/// Any stream to [`StreamInfo`].
#[must_use]
pub fn stream_info(stream: &RawStream) -> StreamInfo {
    let codec_type = text(stream.codec_type.as_ref());
    StreamInfo {
        index: stream.index,
        stream_type: codec_type.clone(),
        codec: text(stream.codec_name.as_ref()),
        codec_type,
        tags: stream.tags.clone(),
    }
}

/// Raw packet to [`PacketObservation`]. Missing timestamps become zero.
#[must_use]
pub fn packet_observation(packet: &RawPacket) -> PacketObservation {
    PacketObservation {
        pts: parse_number(packet.pts_time.as_deref()).unwrap_or(0.0),
        dts: parse_number(packet.dts_time.as_deref()).unwrap_or(0.0),
        size: parse_number(packet.size.as_deref()).unwrap_or(0),
        stream_index: packet.stream_index,
        codec_type: packet.codec_type.as_deref().map(MediaType::from_probe),
        duration: parse_number(packet.duration_time.as_deref()),
        flags: non_empty(packet.flags.as_ref()),
    }
}

/// Raw frame to [`FrameObservation`]. Missing timestamps become zero.
#[must_use]
pub fn frame_observation(frame: &RawFrame) -> FrameObservation {
    let dts = frame.dts_time.as_deref().or(frame.pkt_dts_time.as_deref());
    let duration = frame
        .duration_time
        .as_deref()
        .or(frame.pkt_duration_time.as_deref());

    FrameObservation {
        media_type: frame
            .media_type
            .as_deref()
            .map_or(MediaType::Unknown, MediaType::from_probe),
        stream_index: frame.stream_index,
        key_frame: frame.key_frame == 1,
        pts: parse_number(frame.pts_time.as_deref()).unwrap_or(0.0),
        dts: parse_number(dts).unwrap_or(0.0),
        duration: parse_number(duration).unwrap_or(0.0),
        size: parse_number(frame.pkt_size.as_deref()).unwrap_or(0),
        pict_type: frame.pict_type.as_deref().and_then(PictureType::from_probe),
        coded_picture_number: frame.coded_picture_number,
        width: frame.width,
        height: frame.height,
        pix_fmt: non_empty(frame.pix_fmt.as_ref()),
    }
}
