//! ffprobe process invocation.
//!
//! Each call runs ffprobe with JSON output on a current-thread tokio
//! runtime, bounded by the time left before the caller's deadline. A probe
//! that outlives it is dropped, which kills the child.

use super::schema::{FramesData, PacketsData, ProbeData, RawFrame, RawPacket};
use super::ProbeSource;
use crate::result::{MediaParserError, MediaParserResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

/// Default ffprobe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE_BINARY: &str = "ffprobe";

/// Default time budget of one analysis.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Which ffprobe report to request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeSection {
    /// `-show_format -show_streams`
    Metadata,
    /// `-show_packets`
    Packets,
    /// `-show_frames`
    Frames,
}

impl ProbeSection {
    const fn flags(self) -> &'static [&'static str] {
        match self {
            Self::Metadata => &["-show_format", "-show_streams"],
            Self::Packets => &["-show_packets"],
            Self::Frames => &["-show_frames"],
        }
    }
}

/// Build ffprobe command arguments for JSON output of one section.
#[must_use]
pub fn build_ffprobe_args(section: ProbeSection, input: &str) -> Vec<String> {
    let mut args = vec![
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
    ];
    args.extend(section.flags().iter().map(|flag| (*flag).to_string()));
    args.push(input.to_string());
    args
}

/// ffprobe-backed [`ProbeSource`].
#[derive(Clone, Debug)]
pub struct Ffprobe {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for Ffprobe {
    fn default() -> Self {
        Self::new()
    }
}

impl Ffprobe {
    /// Use `ffprobe` from `PATH` with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_FFPROBE_BINARY),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Use a specific ffprobe binary.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the time budget of one analysis.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured binary.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Verify the binary runs (`ffprobe -version`).
    pub fn check_installed(&self) -> MediaParserResult<()> {
        let output = self
            .run(&["-version".to_string()], None)
            .map_err(|e| match e {
                MediaParserError::Ffprobe { message } => MediaParserError::ffprobe(format!(
                    "{} not found, please install FFmpeg: {message}",
                    self.binary.display()
                )),
                other => other,
            })?;
        tracing::debug!(binary = %self.binary.display(), bytes = output.len(), "ffprobe available");
        Ok(())
    }

    fn run_json<T: DeserializeOwned>(
        &self,
        section: ProbeSection,
        input: &str,
        deadline: Option<Instant>,
    ) -> MediaParserResult<T> {
        let args = build_ffprobe_args(section, input);
        tracing::debug!(binary = %self.binary.display(), ?section, input, "running ffprobe");

        let stdout = self.run(&args, deadline)?;
        serde_json::from_slice(&stdout)
            .map_err(|e| MediaParserError::probe_parse(format!("{section:?} output: {e}")))
    }

    /// Time left before `deadline`, or the full timeout without one.
    fn budget(&self, deadline: Option<Instant>) -> Duration {
        deadline.map_or(self.timeout, |d| d.saturating_duration_since(Instant::now()))
    }

    fn timed_out(&self) -> MediaParserError {
        tracing::warn!(binary = %self.binary.display(), timeout = ?self.timeout, "ffprobe timed out");
        MediaParserError::ProbeTimeout {
            secs: self.timeout.as_secs(),
        }
    }

    /// Run the binary, returning stdout on success.
    fn run(&self, args: &[String], deadline: Option<Instant>) -> MediaParserResult<Vec<u8>> {
        let budget = self.budget(deadline);
        if budget.is_zero() {
            return Err(self.timed_out());
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut command = tokio::process::Command::new(&self.binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output: Output = runtime
            .block_on(async { tokio::time::timeout(budget, command.output()).await })
            .map_err(|_| self.timed_out())?
            .map_err(|e| {
                MediaParserError::ffprobe(format!(
                    "failed to execute {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaParserError::ffprobe(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl ProbeSource for Ffprobe {
    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }

    fn probe(&self, input: &str, deadline: Option<Instant>) -> MediaParserResult<ProbeData> {
        self.run_json(ProbeSection::Metadata, input, deadline)
    }

    fn probe_packets(
        &self,
        input: &str,
        deadline: Option<Instant>,
    ) -> MediaParserResult<Vec<RawPacket>> {
        self.run_json::<PacketsData>(ProbeSection::Packets, input, deadline)
            .map(|data| data.packets)
    }

    fn probe_frames(
        &self,
        input: &str,
        deadline: Option<Instant>,
    ) -> MediaParserResult<Vec<RawFrame>> {
        self.run_json::<FramesData>(ProbeSection::Frames, input, deadline)
            .map(|data| data.frames)
    }
}
