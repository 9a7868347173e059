//! Advisory packet loss heuristic.
//!
//! A PTS jump between consecutive packets is only a hint: interleaved
//! streams and variable frame rates produce the same pattern.

use super::observation::PacketObservation;
use super::types::{Category, Finding, FindingCode, Severity};

/// PTS jump between consecutive packets considered suspicious.
pub const PACKET_GAP_THRESHOLD_SECS: f64 = 0.5;

/// Flag packet-to-packet PTS jumps above [`PACKET_GAP_THRESHOLD_SECS`].
#[must_use]
pub fn analyze_packet_loss(packets: &[PacketObservation]) -> Vec<Finding> {
    packets
        .windows(2)
        .filter_map(|pair| {
            let gap = pair[1].pts - pair[0].pts;
            (gap > PACKET_GAP_THRESHOLD_SECS).then(|| {
                let at = pair[1].pts;
                Finding::new(
                    Severity::Warning,
                    Category::PacketLoss,
                    FindingCode::PotentialPacketLoss,
                    format!("Potential packet loss detected at {at:.2}s"),
                )
                .with_details(format!("PTS jump of {gap:.3}s detected"))
                .with_suggestion("Check network conditions or source integrity")
                .with_timestamp(at)
            })
        })
        .collect()
}
