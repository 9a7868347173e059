//! Device and browser compatibility rules.
//!
//! Rules are an ordered table of predicate/builder pairs; every rule is
//! evaluated and each match contributes one finding.

use super::types::{Category, Finding, FindingCode, Severity};

/// Codec parameters a compatibility rule inspects.
///
/// Names are stored lower case; construct through [`CompatibilityTarget::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompatibilityTarget {
    codec: String,
    profile: String,
    level: i32,
    container: String,
}

impl CompatibilityTarget {
    /// Normalize names to lower case for matching.
    #[must_use]
    pub fn new(
        codec: impl AsRef<str>,
        profile: impl AsRef<str>,
        level: i32,
        container: impl AsRef<str>,
    ) -> Self {
        Self {
            codec: codec.as_ref().to_ascii_lowercase(),
            profile: profile.as_ref().to_ascii_lowercase(),
            level,
            container: container.as_ref().to_ascii_lowercase(),
        }
    }

    /// Codec name, e.g. `h264`
    #[must_use]
    pub fn codec(&self) -> &str {
        &self.codec
    }

    /// Codec profile, e.g. `high`
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Codec level as `major * 10 + minor` (41 = level 4.1)
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Container name, e.g. `mp4`
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }
}

/// Highest H.264 High profile level with broad device support.
pub const MAX_COMPATIBLE_H264_LEVEL: i32 = 41;

struct CompatibilityRule {
    matches: fn(&CompatibilityTarget) -> bool,
    finding: fn(&CompatibilityTarget) -> Finding,
}

const RULES: &[CompatibilityRule] = &[
    CompatibilityRule {
        matches: |t| t.codec == "h264" && t.profile == "high" && t.level > MAX_COMPATIBLE_H264_LEVEL,
        finding: |t| {
            Finding::new(
                Severity::Warning,
                Category::Compatibility,
                FindingCode::H264Compatibility,
                format!(
                    "H.264 High Profile Level {}.{} may have limited compatibility",
                    t.level / 10,
                    t.level % 10
                ),
            )
            .with_suggestion("Consider using Main Profile Level 4.1 or lower for broader compatibility")
        },
    },
    CompatibilityRule {
        matches: |t| matches!(t.codec.as_str(), "hevc" | "h265"),
        finding: |_| {
            Finding::new(
                Severity::Info,
                Category::Compatibility,
                FindingCode::HevcSupport,
                "HEVC/H.265 codec requires modern devices for playback",
            )
            .with_suggestion("Ensure target devices support HEVC or consider providing H.264 fallback")
        },
    },
    CompatibilityRule {
        matches: |t| matches!(t.container.as_str(), "mkv" | "matroska"),
        finding: |_| {
            Finding::new(
                Severity::Info,
                Category::Compatibility,
                FindingCode::ContainerCompatibility,
                "MKV container may have limited browser support",
            )
            .with_suggestion("Consider using MP4 container for web compatibility")
        },
    },
];

/// Evaluate all compatibility rules in table order.
#[must_use]
pub fn analyze_compatibility(target: &CompatibilityTarget) -> Vec<Finding> {
    RULES
        .iter()
        .filter(|rule| (rule.matches)(target))
        .map(|rule| (rule.finding)(target))
        .collect()
}
