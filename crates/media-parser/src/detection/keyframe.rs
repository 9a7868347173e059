//! Keyframe interval analysis.

use super::observation::FrameObservation;
use super::types::{Category, Finding, FindingCode, Severity};

/// Mean keyframe interval above which streaming seek latency suffers.
pub const MAX_KEYFRAME_INTERVAL_SECS: f64 = 10.0;

/// Check that keyframes exist and are spaced for streaming.
///
/// An empty frame list yields nothing. Otherwise fewer than two keyframes
/// yields a single `NO_KEYFRAMES` error and nothing else.
#[must_use]
pub fn analyze_keyframes(frames: &[FrameObservation]) -> Vec<Finding> {
    if frames.is_empty() {
        return Vec::new();
    }

    let keyframe_pts: Vec<f64> = frames
        .iter()
        .filter(|frame| frame.key_frame)
        .map(|frame| frame.pts)
        .collect();

    if keyframe_pts.len() < 2 {
        return vec![Finding::new(
            Severity::Error,
            Category::Keyframe,
            FindingCode::NoKeyframes,
            "No or insufficient keyframes detected",
        )
        .with_suggestion("Check encoder settings for keyframe interval")];
    }

    let intervals: Vec<f64> = keyframe_pts.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;

    if mean > MAX_KEYFRAME_INTERVAL_SECS {
        return vec![Finding::new(
            Severity::Warning,
            Category::Keyframe,
            FindingCode::LargeKeyframeInterval,
            format!("Large keyframe interval: {mean:.2}s"),
        )
        .with_suggestion("For streaming, consider reducing keyframe interval to 2-4 seconds")];
    }

    Vec::new()
}
