//! Bulk import progress reporting.

use crate::bulk::BulkOutcome;

/// Trait for receiving bulk import progress updates.
pub trait ImportProgress {
    /// Called before each file is processed.
    fn on_file(&self, current: usize, total: usize, name: &str);

    /// Called with each file's outcome.
    fn on_outcome(&self, outcome: &BulkOutcome);

    /// Called when the batch is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_file(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_outcome(&self, _outcome: &BulkOutcome) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_file(&self, current: usize, total: usize, name: &str) {
        log::info!("  [{}/{}] {}", current, total, name);
    }

    fn on_outcome(&self, outcome: &BulkOutcome) {
        match outcome {
            BulkOutcome::Imported { .. } => log::info!("    {}", outcome),
            _ => log::warn!("    {}", outcome),
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
