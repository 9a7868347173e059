//! Windowed bitrate time series.

use super::observation::{BitrateKind, BitratePoint, PacketObservation};

/// Default timeline window width in seconds.
pub const DEFAULT_TIMELINE_WINDOW_SECS: f64 = 1.0;

/// Bitrate series over all packets, tagged [`BitrateKind::Total`].
///
/// The window start advances by one width whenever a packet's PTS passes
/// the end of the current window. Windows with no bytes are skipped and the
/// final window is emitted. Returns an empty series for empty input or a
/// non-positive width.
#[must_use]
pub fn generate_bitrate_timeline(packets: &[PacketObservation], window_secs: f64) -> Vec<BitratePoint> {
    build_timeline(packets.iter(), window_secs, BitrateKind::Total)
}

/// Bitrate series over the packets of a single stream.
#[must_use]
pub fn generate_stream_bitrate_timeline(
    packets: &[PacketObservation],
    window_secs: f64,
    stream_index: usize,
    kind: BitrateKind,
) -> Vec<BitratePoint> {
    build_timeline(
        packets.iter().filter(|p| p.stream_index == stream_index),
        window_secs,
        kind,
    )
}

fn build_timeline<'a>(
    packets: impl Iterator<Item = &'a PacketObservation>,
    window_secs: f64,
    kind: BitrateKind,
) -> Vec<BitratePoint> {
    if window_secs.is_nan() || window_secs <= 0.0 {
        return Vec::new();
    }

    let mut timeline = Vec::new();
    let mut window_start = 0.0;
    let mut window_bytes: u64 = 0;

    let point = |time: f64, bytes: u64| BitratePoint {
        time,
        bitrate: bytes as f64 * 8.0 / window_secs,
        kind,
    };

    for packet in packets {
        if packet.pts > window_start + window_secs {
            if window_bytes > 0 {
                timeline.push(point(window_start, window_bytes));
            }
            window_start += window_secs;
            window_bytes = packet.size;
        } else {
            window_bytes += packet.size;
        }
    }

    if window_bytes > 0 {
        timeline.push(point(window_start, window_bytes));
    }

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::observation::MediaType;

    fn packet(pts: f64, size: u64, stream_index: usize) -> PacketObservation {
        PacketObservation::new(pts, pts, size, stream_index)
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_bitrate_timeline(&[], 1.0).is_empty());
    }

    #[test]
    fn test_non_positive_width() {
        let packets = vec![packet(0.0, 100, 0)];
        assert!(generate_bitrate_timeline(&packets, 0.0).is_empty());
        assert!(generate_bitrate_timeline(&packets, -1.0).is_empty());
        assert!(generate_bitrate_timeline(&packets, f64::NAN).is_empty());
    }

    #[test]
    fn test_single_window_emitted() {
        let packets = vec![packet(0.0, 500, 0), packet(0.5, 500, 0)];
        let timeline = generate_bitrate_timeline(&packets, 2.0);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].time, 0.0);
        assert_eq!(timeline[0].bitrate, 4000.0);
        assert_eq!(timeline[0].kind, BitrateKind::Total);
    }

    #[test]
    fn test_windows_advance_by_width() {
        let packets = vec![
            packet(0.0, 1000, 0),
            packet(0.9, 1000, 0),
            packet(1.5, 250, 0),
            packet(2.5, 125, 0),
        ];
        let timeline = generate_bitrate_timeline(&packets, DEFAULT_TIMELINE_WINDOW_SECS);
        let times: Vec<f64> = timeline.iter().map(|p| p.time).collect();
        let rates: Vec<f64> = timeline.iter().map(|p| p.bitrate).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(rates, vec![16000.0, 2000.0, 1000.0]);
    }

    #[test]
    fn test_zero_byte_windows_skipped() {
        let packets = vec![packet(0.0, 0, 0), packet(1.5, 100, 0)];
        let timeline = generate_bitrate_timeline(&packets, 1.0);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].time, 1.0);
    }

    #[test]
    fn test_stream_timeline_filters_and_tags() {
        let packets = vec![
            packet(0.0, 1000, 0).with_codec_type(MediaType::Video),
            packet(0.1, 64, 1).with_codec_type(MediaType::Audio),
            packet(0.2, 1000, 0).with_codec_type(MediaType::Video),
        ];
        let video = generate_stream_bitrate_timeline(&packets, 1.0, 0, BitrateKind::Video);
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].bitrate, 16000.0);
        assert_eq!(video[0].kind, BitrateKind::Video);

        let audio = generate_stream_bitrate_timeline(&packets, 1.0, 1, BitrateKind::Audio);
        assert_eq!(audio[0].bitrate, 512.0);
    }
}
