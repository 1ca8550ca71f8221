//! Progress bar for bulk import.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use dextrack_import::{BulkOutcome, ImportProgress};

/// Reports bulk import progress on an `indicatif` bar.
///
/// Per-file lines are logged above the bar via `suspend` so they don't tear it.
pub(crate) struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    /// A bar sized for `total` files. Hidden when `quiet` is set.
    pub(crate) fn new(total: usize, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        pb.set_style(style);
        Self { pb }
    }
}

impl ImportProgress for BarProgress {
    fn on_file(&self, current: usize, _total: usize, name: &str) {
        self.pb.set_position(current.saturating_sub(1) as u64);
        self.pb.set_message(name.to_string());
    }

    fn on_outcome(&self, outcome: &BulkOutcome) {
        self.pb.inc(1);
        self.pb.suspend(|| match outcome {
            BulkOutcome::Imported { .. } => log::info!(
                "  {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                outcome
            ),
            BulkOutcome::Skipped { .. } => log::info!(
                "  {} {}",
                "-".if_supports_color(Stdout, |t| t.dimmed()),
                outcome
            ),
            BulkOutcome::Unmatched { .. } | BulkOutcome::Failed { .. } => log::warn!(
                "  {} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                outcome
            ),
        });
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
    }
}
