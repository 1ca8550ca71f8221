//! Apply parsed save files to the tracker database.
//!
//! This crate owns the write side of a save import: auto-population of
//! checklist, progress and creature rows, the single-game upload entry point,
//! and bulk import with automatic game matching.

pub mod autopopulate;
pub mod bulk;
pub mod progress;
pub mod upload;

pub use autopopulate::{
    DEX_MILESTONE_PERCENT, PopulateError, PopulateOutcome, PopulatePlan, PopulateRequest,
    PopulateStats, auto_populate, plan_population,
};
pub use bulk::{
    BulkError, BulkOptions, BulkOutcome, BulkReport, BulkStats, SAVE_EXTENSIONS, SkipReason,
    bulk_import, collect_files, is_save_file,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use upload::{
    AutoPopulated, ManualStats, ManualStatsOutcome, SaveUpload, UploadError, UploadOutcome,
    record_manual_stats, upload_save, upload_save_with,
};
