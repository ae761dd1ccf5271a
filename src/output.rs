//! CLI output formatting.
//!
//! Each walked file gets one status line; the run ends with a one-line
//! summary. Format functions are pure (return `String`) for testability;
//! `print_*` wrappers write to stdout.

use crate::pipeline::Outcome;
use crate::walk::FileReport;
use std::fmt;

/// One status line for a walked file.
pub fn format_report(report: &FileReport) -> String {
    let path = report.path.display();
    match &report.outcome {
        Outcome::Skipped => format!("skip      {path}: already normalized"),
        Outcome::SkippedNonImage => format!("skip      {path}: not an image"),
        Outcome::SkippedUnreadable(reason) => format!("skip      {path}: unreadable ({reason})"),
        Outcome::Processed { width, height } => format!("ok        {path} -> {width}x{height}"),
        Outcome::UpscaledProcessed { width, height } => {
            format!("upscaled  {path} -> {width}x{height}")
        }
        Outcome::Failed(e) => format!("failed    {path}: {e}"),
    }
}

pub fn print_report(report: &FileReport) {
    println!("{}", format_report(report));
}

/// Per-run counters, printed once after the walk finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub upscaled: usize,
    pub skipped: usize,
    pub non_image: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped | Outcome::SkippedUnreadable(_) => self.skipped += 1,
            Outcome::SkippedNonImage => self.non_image += 1,
            Outcome::Processed { .. } => self.processed += 1,
            Outcome::UpscaledProcessed { .. } => {
                self.processed += 1;
                self.upscaled += 1;
            }
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed ({} upscaled), {} skipped, {} non-image, {} failed",
            self.processed, self.upscaled, self.skipped, self.non_image, self.failed
        )
    }
}
