//! Status output and probe progress on stderr

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use media_parser::SeverityCounts;
use std::time::Duration;

/// Progress and status reporter.
///
/// Reports go to stdout; everything printed here goes to stderr so that
/// JSON and YAML output stays machine readable.
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a spinner for a step of unknown length, such as an ffprobe run.
    pub fn start_spinner(&mut self, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    /// Update spinner message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Remove the spinner
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "✓".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let _ = self.term.write_line(message);
    }

    /// One-line tally of findings by severity.
    pub fn problem_summary(&self, counts: &SeverityCounts) {
        let blocking = counts.errors + counts.critical;
        if self.quiet && blocking == 0 {
            return;
        }

        let line = if self.use_color {
            let bad = Style::new().red().bold();
            let warn = Style::new().yellow();
            format!(
                "{} problems ({} errors, {} critical, {} warnings, {} info)",
                counts.total(),
                if counts.errors > 0 {
                    bad.apply_to(counts.errors).to_string()
                } else {
                    counts.errors.to_string()
                },
                if counts.critical > 0 {
                    bad.apply_to(counts.critical).to_string()
                } else {
                    counts.critical.to_string()
                },
                warn.apply_to(counts.warnings),
                counts.info
            )
        } else {
            format!(
                "{} problems ({} errors, {} critical, {} warnings, {} info)",
                counts.total(),
                counts.errors,
                counts.critical,
                counts.warnings,
                counts.info
            )
        };

        let _ = self.term.write_line(&line);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = ProgressReporter::new(false, true);
            assert!(!reporter.use_color);
            assert!(reporter.quiet);
        }

        #[test]
        fn test_default_reporter() {
            let reporter = ProgressReporter::default();
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_messages_do_not_panic() {
            let reporter = ProgressReporter::new(false, false);
            reporter.success("Exported media info");
            reporter.failure("ffprobe failed");
            reporter.warning("no video frames");
            reporter.info("Analysis exported to: /tmp/x");
        }

        #[test]
        fn test_spinner_lifecycle() {
            let mut reporter = ProgressReporter::new(false, false);
            reporter.start_spinner("Probing packets");
            reporter.set_message("Probing frames");
            reporter.finish();
            assert!(reporter.progress_bar.is_none());
        }

        #[test]
        fn test_quiet_mode_skips_spinner() {
            let mut reporter = ProgressReporter::new(false, true);
            reporter.start_spinner("Probing");
            assert!(reporter.progress_bar.is_none());
            reporter.finish();
        }

        #[test]
        fn test_problem_summary() {
            let counts = SeverityCounts {
                errors: 1,
                critical: 0,
                warnings: 2,
                info: 3,
            };
            ProgressReporter::new(true, false).problem_summary(&counts);
            ProgressReporter::new(false, true).problem_summary(&SeverityCounts::default());
        }
    }
}
