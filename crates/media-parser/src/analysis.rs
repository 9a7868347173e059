//! Media analyzer pipeline: probe, convert, detect.

use crate::detection::{
    generate_bitrate_timeline, CompatibilityTarget, DetectionEngine, DetectionInput,
    FrameObservation, MediaType, PacketObservation, DEFAULT_TIMELINE_WINDOW_SECS,
};
use crate::media::{DetailedAnalysis, MediaInfo};
use crate::probe::convert::{
    audio_info, format_info, frame_observation, packet_observation, stream_info, video_info,
};
use crate::probe::{Ffprobe, ProbeSource};
use crate::result::MediaParserResult;
use std::time::Instant;

/// What to extract and analyze.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Include the first video stream
    pub show_video: bool,
    /// Include the first audio stream
    pub show_audio: bool,
    /// Include container information
    pub show_format: bool,
    /// Include a summary of every stream
    pub show_streams: bool,
    /// Probe and analyze packets
    pub analyze_packets: bool,
    /// Probe and analyze frames
    pub analyze_frames: bool,
    /// Packet limit, 0 for unlimited
    pub max_packets: usize,
    /// Frame limit, 0 for unlimited
    pub max_frames: usize,
    /// Bitrate timeline window in seconds
    pub timeline_window_secs: f64,
    /// Run frame analyzers over video frames only
    pub video_frames_only: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            show_video: true,
            show_audio: true,
            show_format: true,
            show_streams: false,
            analyze_packets: true,
            analyze_frames: true,
            max_packets: 10_000,
            max_frames: 5_000,
            timeline_window_secs: DEFAULT_TIMELINE_WINDOW_SECS,
            video_frames_only: true,
        }
    }
}

impl AnalysisOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or skip the video stream
    #[must_use]
    pub const fn with_video(mut self, show: bool) -> Self {
        self.show_video = show;
        self
    }

    /// Include or skip the audio stream
    #[must_use]
    pub const fn with_audio(mut self, show: bool) -> Self {
        self.show_audio = show;
        self
    }

    /// Include or skip container information
    #[must_use]
    pub const fn with_format(mut self, show: bool) -> Self {
        self.show_format = show;
        self
    }

    /// Include or skip the stream list
    #[must_use]
    pub const fn with_streams(mut self, show: bool) -> Self {
        self.show_streams = show;
        self
    }

    /// Enable or disable packet analysis
    #[must_use]
    pub const fn with_packets(mut self, analyze: bool) -> Self {
        self.analyze_packets = analyze;
        self
    }

    /// Enable or disable frame analysis
    #[must_use]
    pub const fn with_frames(mut self, analyze: bool) -> Self {
        self.analyze_frames = analyze;
        self
    }

    /// Set the packet limit
    #[must_use]
    pub const fn with_max_packets(mut self, max: usize) -> Self {
        self.max_packets = max;
        self
    }

    /// Set the frame limit
    #[must_use]
    pub const fn with_max_frames(mut self, max: usize) -> Self {
        self.max_frames = max;
        self
    }

    /// Set the bitrate timeline window
    #[must_use]
    pub const fn with_timeline_window(mut self, secs: f64) -> Self {
        self.timeline_window_secs = secs;
        self
    }

    /// Feed every frame, not only video, to the frame analyzers
    #[must_use]
    pub const fn with_video_frames_only(mut self, only: bool) -> Self {
        self.video_frames_only = only;
        self
    }
}

/// `take(limit)` where 0 means unlimited.
const fn effective_limit(max: usize) -> usize {
    if max == 0 {
        usize::MAX
    } else {
        max
    }
}

/// Runs probes and the detection engine over one input at a time.
#[derive(Debug, Clone)]
pub struct MediaAnalyzer<S = Ffprobe> {
    source: S,
    options: AnalysisOptions,
}

impl<S: ProbeSource> MediaAnalyzer<S> {
    /// Create an analyzer over `source`.
    pub const fn new(source: S, options: AnalysisOptions) -> Self {
        Self { source, options }
    }

    /// Options in effect.
    pub const fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Container and stream metadata only.
    pub fn analyze(&self, input: &str) -> MediaParserResult<MediaInfo> {
        self.metadata(input, self.deadline())
    }

    /// One deadline for every probe of a single analysis.
    fn deadline(&self) -> Option<Instant> {
        self.source
            .timeout()
            .and_then(|timeout| Instant::now().checked_add(timeout))
    }

    fn metadata(&self, input: &str, deadline: Option<Instant>) -> MediaParserResult<MediaInfo> {
        let data = self.source.probe(input, deadline)?;
        let mut info = MediaInfo::new(input);

        if self.options.show_format {
            info.format = data.format.as_ref().map(format_info);
        }

        for stream in &data.streams {
            match stream.codec_type.as_deref().map(MediaType::from_probe) {
                Some(MediaType::Video) if self.options.show_video && info.video.is_none() => {
                    info.video = Some(video_info(stream));
                }
                Some(MediaType::Audio) if self.options.show_audio && info.audio.is_none() => {
                    info.audio = Some(audio_info(stream));
                }
                _ => {}
            }
            if self.options.show_streams {
                info.streams.push(stream_info(stream));
            }
        }

        tracing::debug!(input, streams = data.streams.len(), "probed metadata");
        Ok(info)
    }

    /// Metadata plus packet/frame observations, bitrate timeline and findings.
    ///
    /// Packet or frame probe failures are logged and the analysis continues
    /// without that data; only a metadata failure is an error. The source's
    /// timeout bounds the whole call, not each probe.
    pub fn analyze_with_details(&self, input: &str) -> MediaParserResult<DetailedAnalysis> {
        let deadline = self.deadline();
        let media_info = self.metadata(input, deadline)?;
        let mut result = DetailedAnalysis::new(media_info);
        let mut engine = DetectionEngine::new();

        if self.options.analyze_packets {
            result.packets = self.collect_packets(input, deadline);
            if !result.packets.is_empty() {
                engine.run_all(&DetectionInput::new().with_packets(&result.packets));
                result.bitrate_timeline =
                    generate_bitrate_timeline(&result.packets, self.options.timeline_window_secs);
            }
        }

        if self.options.analyze_frames {
            result.frames = self.collect_frames(input, deadline);
            let analyzed: Vec<FrameObservation> = if self.options.video_frames_only {
                result
                    .frames
                    .iter()
                    .filter(|f| f.media_type == MediaType::Video)
                    .cloned()
                    .collect()
            } else {
                result.frames.clone()
            };
            if !analyzed.is_empty() {
                engine.run_all(&DetectionInput::new().with_frames(&analyzed));
            }
        }

        if let Some(video) = &result.media_info.video {
            let target = CompatibilityTarget::new(
                &video.codec,
                video.profile.as_deref().unwrap_or_default(),
                video.level.unwrap_or(0),
                result.media_info.container_name(),
            );
            engine.run_all(&DetectionInput::new().with_compatibility(&target));
        }

        tracing::info!(
            input,
            packets = result.packets.len(),
            frames = result.frames.len(),
            problems = engine.findings().len(),
            "analysis complete"
        );
        result.problems = engine.into_findings();
        Ok(result)
    }

    fn collect_packets(&self, input: &str, deadline: Option<Instant>) -> Vec<PacketObservation> {
        match self.source.probe_packets(input, deadline) {
            Ok(raw) => raw
                .iter()
                .take(effective_limit(self.options.max_packets))
                .map(packet_observation)
                .collect(),
            Err(e) => {
                tracing::warn!(input, error = %e, "failed to analyze packets");
                Vec::new()
            }
        }
    }

    fn collect_frames(&self, input: &str, deadline: Option<Instant>) -> Vec<FrameObservation> {
        match self.source.probe_frames(input, deadline) {
            Ok(raw) => raw
                .iter()
                .take(effective_limit(self.options.max_frames))
                .map(frame_observation)
                .collect(),
            Err(e) => {
                tracing::warn!(input, error = %e, "failed to analyze frames");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detection::FindingCode;
    use crate::probe::{ProbeData, RawFrame, RawPacket};
    use crate::result::MediaParserError;

    /// Serves canned documents; `None` sections fail like a broken probe.
    struct FixtureSource {
        metadata: &'static str,
        packets: Option<Vec<RawPacket>>,
        frames: Option<Vec<RawFrame>>,
    }

    impl ProbeSource for FixtureSource {
        fn probe(&self, _input: &str, _deadline: Option<Instant>) -> MediaParserResult<ProbeData> {
            Ok(serde_json::from_str(self.metadata)?)
        }

        fn probe_packets(
            &self,
            _input: &str,
            _deadline: Option<Instant>,
        ) -> MediaParserResult<Vec<RawPacket>> {
            self.packets
                .clone()
                .ok_or_else(|| MediaParserError::ffprobe("packets unavailable"))
        }

        fn probe_frames(
            &self,
            _input: &str,
            _deadline: Option<Instant>,
        ) -> MediaParserResult<Vec<RawFrame>> {
            self.frames
                .clone()
                .ok_or_else(|| MediaParserError::ffprobe("frames unavailable"))
        }
    }

    const MKV_HEVC: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "hevc", "profile": "Main", "level": 120, "width": 3840, "height": 2160},
            {"index": 1, "codec_type": "audio", "codec_name": "opus", "sample_rate": "48000", "channels": 2},
            {"index": 2, "codec_type": "audio", "codec_name": "aac", "sample_rate": "44100", "channels": 2},
            {"index": 3, "codec_type": "subtitle", "codec_name": "subrip"}
        ],
        "format": {"format_name": "matroska,webm", "duration": "10.000000", "size": "1000000", "bit_rate": "800000", "probe_score": 100}
    }"#;

    fn raw_packet(pts: f64, size: u64) -> RawPacket {
        RawPacket {
            codec_type: Some("video".to_string()),
            stream_index: 0,
            pts_time: Some(format!("{pts:.6}")),
            dts_time: Some(format!("{pts:.6}")),
            size: Some(size.to_string()),
            ..RawPacket::default()
        }
    }

    fn raw_frame(media_type: &str, pts: f64, key_frame: bool) -> RawFrame {
        RawFrame {
            media_type: Some(media_type.to_string()),
            key_frame: i32::from(key_frame),
            pts_time: Some(format!("{pts:.6}")),
            ..RawFrame::default()
        }
    }

    fn source(packets: Option<Vec<RawPacket>>, frames: Option<Vec<RawFrame>>) -> FixtureSource {
        FixtureSource {
            metadata: MKV_HEVC,
            packets,
            frames,
        }
    }

    fn codes(analysis: &DetailedAnalysis) -> Vec<FindingCode> {
        analysis.problems.iter().map(|p| p.code).collect()
    }

    #[test]
    fn test_default_options() {
        let options = AnalysisOptions::default();
        assert!(options.show_video && options.show_audio && options.show_format);
        assert!(!options.show_streams);
        assert_eq!(options.max_packets, 10_000);
        assert_eq!(options.max_frames, 5_000);
        assert_eq!(options.timeline_window_secs, 1.0);
        assert!(options.video_frames_only);
    }

    #[test]
    fn test_options_builders() {
        let options = AnalysisOptions::new()
            .with_streams(true)
            .with_audio(false)
            .with_packets(false)
            .with_max_frames(0)
            .with_timeline_window(2.0);
        assert!(options.show_streams);
        assert!(!options.show_audio);
        assert!(!options.analyze_packets);
        assert_eq!(options.max_frames, 0);
        assert_eq!(options.timeline_window_secs, 2.0);
    }

    #[test]
    fn test_analyze_picks_first_streams() {
        let analyzer = MediaAnalyzer::new(source(None, None), AnalysisOptions::default());
        let info = analyzer.analyze("movie.mkv").unwrap();
        assert_eq!(info.input, "movie.mkv");
        assert_eq!(info.video.as_ref().unwrap().codec, "hevc");
        assert_eq!(info.audio.as_ref().unwrap().codec, "opus");
        assert!(info.streams.is_empty());
        assert_eq!(info.format.as_ref().unwrap().size, 1_000_000);
    }

    #[test]
    fn test_analyze_respects_section_flags() {
        let options = AnalysisOptions::new()
            .with_video(false)
            .with_format(false)
            .with_streams(true);
        let info = MediaAnalyzer::new(source(None, None), options)
            .analyze("movie.mkv")
            .unwrap();
        assert!(info.video.is_none());
        assert!(info.format.is_none());
        assert!(info.audio.is_some());
        assert_eq!(info.streams.len(), 4);
        assert_eq!(info.streams[3].stream_type, "subtitle");
    }

    #[test]
    fn test_probe_failures_are_skipped() {
        let analyzer = MediaAnalyzer::new(source(None, None), AnalysisOptions::default());
        let analysis = analyzer.analyze_with_details("movie.mkv").unwrap();
        assert!(analysis.packets.is_empty());
        assert!(analysis.frames.is_empty());
        assert_eq!(
            codes(&analysis),
            vec![FindingCode::HevcSupport, FindingCode::ContainerCompatibility]
        );
    }

    #[test]
    fn test_limits_truncate_observations() {
        let packets = (0..50).map(|i| raw_packet(f64::from(i) * 0.1, 1000)).collect();
        let frames = (0..50)
            .map(|i| raw_frame("video", f64::from(i) * 0.1, i % 10 == 0))
            .collect();
        let options = AnalysisOptions::new().with_max_packets(20).with_max_frames(30);
        let analysis = MediaAnalyzer::new(source(Some(packets), Some(frames)), options)
            .analyze_with_details("movie.mkv")
            .unwrap();
        assert_eq!(analysis.packets.len(), 20);
        assert_eq!(analysis.frames.len(), 30);
        assert!(!analysis.bitrate_timeline.is_empty());
    }

    #[test]
    fn test_detection_order_and_video_frame_filter() {
        let packets = vec![raw_packet(0.0, 1000), raw_packet(0.04, 1000), raw_packet(2.0, 1000)];
        // Audio keyframes must not rescue the video stream from NO_KEYFRAMES.
        let frames = vec![
            raw_frame("video", 0.0, true),
            raw_frame("audio", 0.0, true),
            raw_frame("audio", 0.02, true),
            raw_frame("video", 0.04, false),
        ];
        let analysis = MediaAnalyzer::new(source(Some(packets), Some(frames)), AnalysisOptions::default())
            .analyze_with_details("movie.mkv")
            .unwrap();
        assert_eq!(
            codes(&analysis),
            vec![
                FindingCode::PotentialPacketLoss,
                FindingCode::NoKeyframes,
                FindingCode::HevcSupport,
                FindingCode::ContainerCompatibility,
            ]
        );
        assert_eq!(analysis.frames.len(), 4);
    }

    #[test]
    fn test_all_frames_when_not_video_only() {
        let frames = vec![
            raw_frame("video", 0.0, true),
            raw_frame("audio", 2.0, true),
            raw_frame("audio", 4.0, true),
        ];
        let options = AnalysisOptions::new()
            .with_packets(false)
            .with_video_frames_only(false);
        let analysis = MediaAnalyzer::new(source(None, Some(frames)), options)
            .analyze_with_details("movie.mkv")
            .unwrap();
        assert!(!codes(&analysis).contains(&FindingCode::NoKeyframes));
        assert_eq!(codes(&analysis).iter().filter(|c| **c == FindingCode::LargePtsGap).count(), 2);
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use std::time::Duration;

        fn script(dir: &tempfile::TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("fake-ffprobe");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_timeout_bounds_whole_detailed_analysis() {
            let dir = tempfile::tempdir().unwrap();
            let binary = script(
                &dir,
                r#"case "$*" in
  *-show_streams*) echo '{"streams":[{"index":0,"codec_type":"video","codec_name":"h264","profile":"Main","level":31}],"format":{"format_name":"mp4"}}';;
  *) sleep 1.5; echo '{}';;
esac"#,
            );
            let ffprobe = Ffprobe::new()
                .with_binary(binary)
                .with_timeout(Duration::from_secs(2));
            let analyzer = MediaAnalyzer::new(ffprobe, AnalysisOptions::new());

            let started = Instant::now();
            let analysis = analyzer.analyze_with_details("clip.mp4").unwrap();
            let elapsed = started.elapsed();

            // packets fit the budget, frames run out of it
            assert!(elapsed < Duration::from_millis(2_800), "took {elapsed:?}");
            assert_eq!(analysis.media_info.video.as_ref().unwrap().codec, "h264");
            assert!(analysis.frames.is_empty());
        }

        #[test]
        fn test_metadata_alone_uses_full_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let binary = script(
                &dir,
                r#"sleep 0.3; echo '{"streams":[],"format":{"format_name":"mp4"}}'"#,
            );
            let ffprobe = Ffprobe::new()
                .with_binary(binary)
                .with_timeout(Duration::from_secs(2));
            let info = MediaAnalyzer::new(ffprobe, AnalysisOptions::new())
                .analyze("clip.mp4")
                .unwrap();
            assert!(info.video.is_none());
        }
    }
}
