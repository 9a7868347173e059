//! Finding model for problem detection.
//!
//! A [`Finding`] is one diagnostic produced by an analyzer. Severity,
//! category and code are closed enumerations so reports can group and
//! order them without string matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much operator attention a finding needs.
///
/// Ordered: `Info < Warning < Critical < Error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational, no action required
    Info,
    /// Likely problem worth reviewing
    Warning,
    /// Serious problem affecting playback
    Critical,
    /// Broken stream invariant
    Error,
}

impl Severity {
    /// All severities, most severe first (report grouping order).
    pub const BY_ATTENTION: [Self; 4] = [Self::Error, Self::Critical, Self::Warning, Self::Info];

    /// Stable upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area of the media a finding concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Codec parameters
    #[serde(rename = "CODEC")]
    Codec,
    /// Container format
    #[serde(rename = "CONTAINER")]
    Container,
    /// Bitrate behaviour
    #[serde(rename = "BITRATE")]
    Bitrate,
    /// Frame rate
    #[serde(rename = "FRAMERATE")]
    FrameRate,
    /// Picture dimensions
    #[serde(rename = "RESOLUTION")]
    Resolution,
    /// Audio stream
    #[serde(rename = "AUDIO")]
    Audio,
    /// PTS/DTS ordering
    #[serde(rename = "TIMESTAMP")]
    Timestamp,
    /// Keyframe distribution
    #[serde(rename = "KEYFRAME")]
    Keyframe,
    /// Gaps suggesting lost packets
    #[serde(rename = "PACKET_LOSS")]
    PacketLoss,
    /// Device/browser compatibility
    #[serde(rename = "COMPATIBILITY")]
    Compatibility,
}

impl Category {
    /// Stable upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Codec => "CODEC",
            Self::Container => "CONTAINER",
            Self::Bitrate => "BITRATE",
            Self::FrameRate => "FRAMERATE",
            Self::Resolution => "RESOLUTION",
            Self::Audio => "AUDIO",
            Self::Timestamp => "TIMESTAMP",
            Self::Keyframe => "KEYFRAME",
            Self::PacketLoss => "PACKET_LOSS",
            Self::Compatibility => "COMPATIBILITY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable identifier of a problem kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    /// Coefficient of variation of window bitrates above threshold
    BitrateHighVariance,
    /// Single window far above the mean bitrate
    BitrateSpike,
    /// Fewer than two keyframes
    NoKeyframes,
    /// Mean keyframe interval too long for streaming
    LargeKeyframeInterval,
    /// PTS went backwards
    NonMonotonicPts,
    /// PTS jumped forward by more than a second
    LargePtsGap,
    /// DTS went backwards
    NonMonotonicDts,
    /// Frame decoded after it should be presented
    PtsBeforeDts,
    /// Packet timing gap that may indicate loss
    PotentialPacketLoss,
    /// H.264 profile/level with limited device support
    H264Compatibility,
    /// HEVC requires modern decoders
    HevcSupport,
    /// Container with limited browser support
    ContainerCompatibility,
}

impl FindingCode {
    /// Stable identifier string, e.g. `BITRATE_HIGH_VARIANCE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BitrateHighVariance => "BITRATE_HIGH_VARIANCE",
            Self::BitrateSpike => "BITRATE_SPIKE",
            Self::NoKeyframes => "NO_KEYFRAMES",
            Self::LargeKeyframeInterval => "LARGE_KEYFRAME_INTERVAL",
            Self::NonMonotonicPts => "NON_MONOTONIC_PTS",
            Self::LargePtsGap => "LARGE_PTS_GAP",
            Self::NonMonotonicDts => "NON_MONOTONIC_DTS",
            Self::PtsBeforeDts => "PTS_BEFORE_DTS",
            Self::PotentialPacketLoss => "POTENTIAL_PACKET_LOSS",
            Self::H264Compatibility => "H264_COMPATIBILITY",
            Self::HevcSupport => "HEVC_SUPPORT",
            Self::ContainerCompatibility => "CONTAINER_COMPATIBILITY",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic produced by an analyzer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity
    pub severity: Severity,
    /// Category
    pub category: Category,
    /// Problem kind
    pub code: FindingCode,
    /// One-line summary
    pub message: String,
    /// Elaboration, e.g. the measured values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Remediation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Media time in seconds; `None` or zero applies to the whole input
    #[serde(default, skip_serializing_if = "is_global")]
    pub timestamp: Option<f64>,
}

fn is_global(timestamp: &Option<f64>) -> bool {
    timestamp.map_or(true, |t| t == 0.0)
}

impl Finding {
    /// Create a finding with no details, suggestion or timestamp.
    #[must_use]
    pub fn new(
        severity: Severity,
        category: Category,
        code: FindingCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            code,
            message: message.into(),
            details: None,
            suggestion: None,
            timestamp: None,
        }
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach a remediation hint.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the media time the condition was observed at.
    #[must_use]
    pub const fn with_timestamp(mut self, secs: f64) -> Self {
        self.timestamp = Some(secs);
        self
    }

    /// Whether the finding applies to the whole input rather than a point in time.
    #[must_use]
    pub fn is_global(&self) -> bool {
        is_global(&self.timestamp)
    }
}

/// Finding counts per severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    /// Error findings
    pub errors: usize,
    /// Critical findings
    pub critical: usize,
    /// Warning findings
    pub warnings: usize,
    /// Info findings
    pub info: usize,
}

impl SeverityCounts {
    /// Count findings by severity.
    #[must_use]
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut counts, f| {
            match f.severity {
                Severity::Error => counts.errors += 1,
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warnings += 1,
                Severity::Info => counts.info += 1,
            }
            counts
        })
    }

    /// Total number of findings.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.errors + self.critical + self.warnings + self.info
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spike() -> Finding {
        Finding::new(
            Severity::Warning,
            Category::Bitrate,
            FindingCode::BitrateSpike,
            "Bitrate spike detected at ~4.00s",
        )
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert!(Severity::Critical < Severity::Error);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_category_labels_match_serde() {
        for category in [
            Category::FrameRate,
            Category::PacketLoss,
            Category::Compatibility,
            Category::Codec,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_code_labels_match_serde() {
        for code in [
            FindingCode::BitrateHighVariance,
            FindingCode::H264Compatibility,
            FindingCode::PtsBeforeDts,
            FindingCode::NonMonotonicDts,
            FindingCode::ContainerCompatibility,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_finding_serialization_omits_empty_fields() {
        let json = serde_json::to_string(&spike()).unwrap();
        assert!(json.contains("\"severity\":\"WARNING\""));
        assert!(json.contains("\"category\":\"BITRATE\""));
        assert!(json.contains("\"code\":\"BITRATE_SPIKE\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("suggestion"));
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_zero_timestamp_is_global() {
        let finding = spike().with_timestamp(0.0);
        assert!(finding.is_global());
        let json = serde_json::to_string(&finding).unwrap();
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_finding_builders() {
        let finding = spike()
            .with_details("Spike: 10.00 Mbps (avg: 2.80 Mbps)")
            .with_suggestion("Review encoding settings")
            .with_timestamp(4.0);
        assert_eq!(finding.timestamp, Some(4.0));
        assert!(!finding.is_global());
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains("\"timestamp\":4.0"));
        assert!(json.contains("\"details\""));
    }

    #[test]
    fn test_finding_roundtrip() {
        let finding = spike().with_timestamp(2.5);
        let json = serde_json::to_string(&finding).unwrap();
        let back: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, finding);
    }

    #[test]
    fn test_severity_counts() {
        let findings = vec![
            spike(),
            spike(),
            Finding::new(
                Severity::Error,
                Category::Keyframe,
                FindingCode::NoKeyframes,
                "No or insufficient keyframes detected",
            ),
        ];
        let counts = SeverityCounts::from_findings(&findings);
        assert_eq!(counts.warnings, 2);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.info, 0);
        assert_eq!(counts.total(), 3);
    }
}
