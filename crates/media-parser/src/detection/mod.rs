//! Problem detection over packet and frame sequences.
//!
//! Each analyzer is a pure function from observations to a batch of
//! [`Finding`]s. [`DetectionEngine`] runs them and keeps the batches in
//! order.

mod bitrate;
mod compatibility;
mod engine;
mod keyframe;
mod observation;
mod packet_loss;
mod timeline;
mod timestamp;
mod types;

pub use bitrate::{analyze_bitrate, window_bitrates, DETECTION_WINDOW_SECS, HIGH_VARIANCE_CV, SPIKE_FACTOR};
pub use compatibility::{analyze_compatibility, CompatibilityTarget, MAX_COMPATIBLE_H264_LEVEL};
pub use engine::{DetectionEngine, DetectionInput};
pub use keyframe::{analyze_keyframes, MAX_KEYFRAME_INTERVAL_SECS};
pub use observation::{
    BitrateKind, BitratePoint, FrameObservation, MediaType, PacketObservation, PictureType,
};
pub use packet_loss::{analyze_packet_loss, PACKET_GAP_THRESHOLD_SECS};
pub use timeline::{
    generate_bitrate_timeline, generate_stream_bitrate_timeline, DEFAULT_TIMELINE_WINDOW_SECS,
};
pub use timestamp::{analyze_timestamps, MAX_PTS_GAP_SECS};
pub use types::{Category, Finding, FindingCode, Severity, SeverityCounts};
