//! Human-readable durations, sizes and bitrates.

/// `HH:MM:SS.mmm`. Negative and non-finite values render as zero.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds - hours * 3600.0) / 60.0).floor();
    let secs = seconds - hours * 3600.0 - minutes * 60.0;
    format!("{:02}:{:02}:{:06.3}", hours as u64, minutes as u64, secs)
}

/// Binary units: `512 B`, `1.50 KB`, `2.00 GB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.2} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Decimal units: `800 bps`, `128.0 kbps`, `4.50 Mbps`.
#[must_use]
pub fn format_bitrate(bps: u64) -> String {
    if bps < 1_000 {
        format!("{bps} bps")
    } else if bps < 1_000_000 {
        format!("{:.1} kbps", bps as f64 / 1_000.0)
    } else {
        format!("{:.2} Mbps", bps as f64 / 1_000_000.0)
    }
}
