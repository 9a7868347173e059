//! PTS/DTS ordering checks over adjacent frames.

use super::observation::FrameObservation;
use super::types::{Category, Finding, FindingCode, Severity};

/// Forward PTS jump that counts as a discontinuity.
pub const MAX_PTS_GAP_SECS: f64 = 1.0;

/// Check every adjacent frame pair for ordering problems.
///
/// The four checks are independent; one pair may yield several findings.
/// DTS checks only run when both frames carry a positive DTS.
#[must_use]
pub fn analyze_timestamps(frames: &[FrameObservation]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (offset, pair) in frames.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let index = offset + 1;

        if current.pts < previous.pts {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Category::Timestamp,
                    FindingCode::NonMonotonicPts,
                    format!("Non-monotonic PTS at frame {index}"),
                )
                .with_details(format!(
                    "Current: {:.3}, Previous: {:.3}",
                    current.pts, previous.pts
                ))
                .with_suggestion("Check source file or encoding process for timestamp issues")
                .with_timestamp(current.pts),
            );
        }

        let gap = current.pts - previous.pts;
        if gap > MAX_PTS_GAP_SECS {
            findings.push(
                Finding::new(
                    Severity::Warning,
                    Category::Timestamp,
                    FindingCode::LargePtsGap,
                    format!("Large PTS gap at frame {index}"),
                )
                .with_details(format!("Gap: {gap:.3}s"))
                .with_suggestion("Check for missing frames or timestamp discontinuities")
                .with_timestamp(current.pts),
            );
        }

        if !current.has_dts_with(previous) {
            continue;
        }

        if current.dts < previous.dts {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Category::Timestamp,
                    FindingCode::NonMonotonicDts,
                    format!("Non-monotonic DTS at frame {index}"),
                )
                .with_details(format!(
                    "Current: {:.3}, Previous: {:.3}",
                    current.dts, previous.dts
                ))
                .with_suggestion("DTS must be monotonically increasing")
                .with_timestamp(current.pts),
            );
        }

        if current.pts < current.dts {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Category::Timestamp,
                    FindingCode::PtsBeforeDts,
                    format!("PTS before DTS at frame {index}"),
                )
                .with_details(format!("PTS: {:.3}, DTS: {:.3}", current.pts, current.dts))
                .with_suggestion("PTS must be greater than or equal to DTS")
                .with_timestamp(current.pts),
            );
        }
    }

    findings
}
