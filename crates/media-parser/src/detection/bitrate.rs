//! Bitrate variance and spike detection.
//!
//! Packets are bucketed into fixed one-second windows. The window is
//! re-anchored at the PTS of the packet that overflows it, so sparse
//! streams never produce empty windows in between. The final open window
//! is not counted because it is usually partial.

use super::observation::PacketObservation;
use super::types::{Category, Finding, FindingCode, Severity};

/// Width of a detection window in seconds.
pub const DETECTION_WINDOW_SECS: f64 = 1.0;

/// Coefficient of variation above which bitrate is considered unstable.
pub const HIGH_VARIANCE_CV: f64 = 0.3;

/// A window above this multiple of the mean bitrate is a spike.
pub const SPIKE_FACTOR: f64 = 2.5;

/// Bitrate in bits per second of each closed detection window, in order.
#[must_use]
pub fn window_bitrates(packets: &[PacketObservation]) -> Vec<f64> {
    let mut bitrates = Vec::new();
    let mut window_start = 0.0;
    let mut window_bytes: u64 = 0;

    for packet in packets {
        if packet.pts > window_start + DETECTION_WINDOW_SECS {
            if window_bytes > 0 {
                bitrates.push(window_bytes as f64 * 8.0 / DETECTION_WINDOW_SECS);
            }
            window_start = packet.pts;
            window_bytes = packet.size;
        } else {
            window_bytes += packet.size;
        }
    }

    bitrates
}

/// Mean and population standard deviation.
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Flag unstable bitrate and isolated spikes.
#[must_use]
pub fn analyze_bitrate(packets: &[PacketObservation]) -> Vec<Finding> {
    if packets.len() < 2 {
        return Vec::new();
    }

    let bitrates = window_bitrates(packets);
    if bitrates.is_empty() {
        return Vec::new();
    }

    let (mean, std_dev) = mean_and_std_dev(&bitrates);
    let mut findings = Vec::new();

    if mean > 0.0 {
        let cv = std_dev / mean;
        if cv > HIGH_VARIANCE_CV {
            findings.push(
                Finding::new(
                    Severity::Warning,
                    Category::Bitrate,
                    FindingCode::BitrateHighVariance,
                    format!("High bitrate variation detected (CV: {cv:.2})"),
                )
                .with_details(format!(
                    "Average: {:.2} Mbps, StdDev: {:.2} Mbps",
                    mean / 1_000_000.0,
                    std_dev / 1_000_000.0
                ))
                .with_suggestion(
                    "Consider using constant bitrate encoding or adjusting rate control settings",
                ),
            );
        }
    }

    for (index, bitrate) in bitrates.iter().enumerate() {
        if *bitrate > mean * SPIKE_FACTOR {
            let at = index as f64 * DETECTION_WINDOW_SECS;
            findings.push(
                Finding::new(
                    Severity::Warning,
                    Category::Bitrate,
                    FindingCode::BitrateSpike,
                    format!("Bitrate spike detected at ~{at:.2}s"),
                )
                .with_details(format!(
                    "Spike: {:.2} Mbps (avg: {:.2} Mbps)",
                    bitrate / 1_000_000.0,
                    mean / 1_000_000.0
                ))
                .with_suggestion("Review encoding settings or source content at this timestamp")
                .with_timestamp(at),
            );
        }
    }

    findings
}
