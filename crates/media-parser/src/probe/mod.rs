//! Media probing.
//!
//! [`ProbeSource`] abstracts where raw probe documents come from so the
//! analyzer pipeline can run against fixtures; [`Ffprobe`] is the real
//! implementation.

mod command;
pub mod convert;
mod schema;

pub use command::{
    build_ffprobe_args, Ffprobe, ProbeSection, DEFAULT_FFPROBE_BINARY, DEFAULT_PROBE_TIMEOUT,
};
pub use schema::{FramesData, PacketsData, ProbeData, RawFormat, RawFrame, RawPacket, RawStream};

use crate::result::MediaParserResult;
use std::time::{Duration, Instant};

/// Source of raw ffprobe documents.
///
/// Each call takes an optional deadline shared by every probe of one
/// analysis; a source that cannot finish before it fails with
/// [`MediaParserError::ProbeTimeout`](crate::MediaParserError::ProbeTimeout).
pub trait ProbeSource {
    /// Time budget for one analysis, `None` when unbounded.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Container and stream metadata.
    fn probe(&self, input: &str, deadline: Option<Instant>) -> MediaParserResult<ProbeData>;

    /// Every packet, in demux order.
    fn probe_packets(
        &self,
        input: &str,
        deadline: Option<Instant>,
    ) -> MediaParserResult<Vec<RawPacket>>;

    /// Every decoded frame, in output order.
    fn probe_frames(
        &self,
        input: &str,
        deadline: Option<Instant>,
    ) -> MediaParserResult<Vec<RawFrame>>;
}
