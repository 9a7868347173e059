//! Detection engine: an owned, append-only collection of findings.
//!
//! Create one engine per analysis, feed it observations through the
//! per-analyzer methods or [`DetectionEngine::run_all`], then read the
//! findings back.
//!
//! # Example
//!
//! ```
//! use media_parser::detection::{CompatibilityTarget, DetectionEngine, FindingCode};
//!
//! let mut engine = DetectionEngine::new();
//! engine.detect_compatibility(&CompatibilityTarget::new("hevc", "Main", 120, "mkv"));
//! let codes: Vec<_> = engine.findings().iter().map(|f| f.code).collect();
//! assert_eq!(codes, vec![FindingCode::HevcSupport, FindingCode::ContainerCompatibility]);
//! ```

use super::bitrate::analyze_bitrate;
use super::compatibility::{analyze_compatibility, CompatibilityTarget};
use super::keyframe::analyze_keyframes;
use super::observation::{FrameObservation, PacketObservation};
use super::packet_loss::analyze_packet_loss;
use super::timestamp::analyze_timestamps;
use super::types::{Finding, Severity, SeverityCounts};

/// Observations available for one analysis. Absent inputs skip the
/// analyzers that need them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetectionInput<'a> {
    /// Packets in probe order
    pub packets: Option<&'a [PacketObservation]>,
    /// Frames in probe order (usually video only)
    pub frames: Option<&'a [FrameObservation]>,
    /// Codec parameters of the primary video stream
    pub compatibility: Option<&'a CompatibilityTarget>,
}

impl<'a> DetectionInput<'a> {
    /// Empty input; every analyzer is skipped.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            packets: None,
            frames: None,
            compatibility: None,
        }
    }

    /// Provide packets.
    #[must_use]
    pub const fn with_packets(mut self, packets: &'a [PacketObservation]) -> Self {
        self.packets = Some(packets);
        self
    }

    /// Provide frames.
    #[must_use]
    pub const fn with_frames(mut self, frames: &'a [FrameObservation]) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Provide codec parameters.
    #[must_use]
    pub const fn with_compatibility(mut self, target: &'a CompatibilityTarget) -> Self {
        self.compatibility = Some(target);
        self
    }
}

/// Accumulates findings from the analyzers in call order.
#[derive(Clone, Debug, Default)]
pub struct DetectionEngine {
    findings: Vec<Finding>,
}

impl DetectionEngine {
    /// Create an empty engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    fn append(&mut self, analyzer: &str, batch: Vec<Finding>) {
        tracing::debug!(analyzer, count = batch.len(), "analyzer finished");
        self.findings.extend(batch);
    }

    /// Bitrate variance and spikes.
    pub fn detect_bitrate_issues(&mut self, packets: &[PacketObservation]) {
        self.append("bitrate", analyze_bitrate(packets));
    }

    /// Keyframe presence and spacing.
    pub fn detect_keyframe_issues(&mut self, frames: &[FrameObservation]) {
        self.append("keyframe", analyze_keyframes(frames));
    }

    /// PTS/DTS ordering.
    pub fn detect_timestamp_issues(&mut self, frames: &[FrameObservation]) {
        self.append("timestamp", analyze_timestamps(frames));
    }

    /// Packet timing gaps.
    pub fn detect_packet_loss(&mut self, packets: &[PacketObservation]) {
        self.append("packet_loss", analyze_packet_loss(packets));
    }

    /// Codec/container compatibility.
    pub fn detect_compatibility(&mut self, target: &CompatibilityTarget) {
        self.append("compatibility", analyze_compatibility(target));
    }

    /// Run every analyzer whose input is present, in the order bitrate,
    /// packet loss, keyframe, timestamp, compatibility.
    pub fn run_all(&mut self, input: &DetectionInput<'_>) {
        if let Some(packets) = input.packets {
            self.detect_bitrate_issues(packets);
            self.detect_packet_loss(packets);
        }
        if let Some(frames) = input.frames {
            self.detect_keyframe_issues(frames);
            self.detect_timestamp_issues(frames);
        }
        if let Some(target) = input.compatibility {
            self.detect_compatibility(target);
        }
    }

    /// Append findings produced elsewhere, preserving their order.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// All findings so far, in production order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consume the engine, returning its findings.
    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Counts per severity.
    #[must_use]
    pub fn summary(&self) -> SeverityCounts {
        SeverityCounts::from_findings(&self.findings)
    }

    /// Whether any Error or Critical finding was produced.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity >= Severity::Critical)
    }
}
