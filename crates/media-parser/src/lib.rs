//! media-parser: ffprobe-backed media diagnostics
//!
//! Probes media files and streams with ffprobe, turns the JSON reports into
//! typed metadata and packet/frame observations, and runs heuristic
//! analyzers that flag bitrate instability, keyframe problems, timestamp
//! disorder, probable packet loss and playback compatibility risks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌────────────────┐   ┌──────────┐
//! │ ffprobe  │──►│ convert  │──►│ DetectionEngine│──►│ Reporter │
//! │ (probe)  │   │ (media)  │   │ (detection)    │   │ / export │
//! └──────────┘   └──────────┘   └────────────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use media_parser::prelude::*;
//!
//! let packets: Vec<PacketObservation> = (0..20)
//!     .map(|i| PacketObservation::new(f64::from(i) * 0.25, f64::from(i) * 0.25, 4096, 0))
//!     .collect();
//!
//! let mut engine = DetectionEngine::new();
//! engine.run_all(&DetectionInput::new().with_packets(&packets));
//! assert!(engine.findings().is_empty());
//!
//! let timeline = generate_bitrate_timeline(&packets, DEFAULT_TIMELINE_WINDOW_SECS);
//! assert_eq!(timeline[0].bitrate, 5.0 * 4096.0 * 8.0);
//! ```

#![warn(missing_docs)]

/// Problem detection: finding model, analyzers and the detection engine.
#[allow(clippy::missing_const_for_fn, clippy::doc_markdown)]
pub mod detection;

/// ffprobe invocation and raw report conversion.
#[allow(clippy::missing_errors_doc, clippy::doc_markdown)]
pub mod probe;

/// Media analyzer pipeline.
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod analysis;

/// Typed media metadata.
pub mod media;

/// Text, JSON and YAML reports.
#[allow(clippy::missing_errors_doc, clippy::cast_precision_loss)]
pub mod report;

/// JSON export and frame visualization.
#[allow(clippy::missing_errors_doc)]
pub mod export;

mod result;

pub use analysis::{AnalysisOptions, MediaAnalyzer};
pub use detection::{
    BitrateKind, BitratePoint, Category, CompatibilityTarget, DetectionEngine, DetectionInput,
    Finding, FindingCode, FrameObservation, MediaType, PacketObservation, PictureType, Severity,
    SeverityCounts,
};
pub use export::{
    export_analysis, export_analysis_with_timestamp, ExportKind, ExportOptions, ExportSummary,
    ExportedFile, FrameVisualization,
};
pub use media::{AudioInfo, DetailedAnalysis, FormatInfo, MediaInfo, StreamInfo, VideoInfo};
pub use probe::{Ffprobe, ProbeSource};
pub use report::{ReportFormat, ReportOptions, Reporter};
pub use result::{MediaParserError, MediaParserResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::analysis::*;
    pub use super::detection::*;
    pub use super::export::*;
    pub use super::media::*;
    pub use super::probe::{Ffprobe, ProbeSource};
    pub use super::report::*;
    pub use super::result::*;
}
