//! SQLite persistence layer for games, checklists and per-user progress.
//!
//! Provides schema creation, upsert operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    ClearStats, NewCreature, OperationError, SeedStats, clear_user_progress, delete_creatures,
    insert_creature_if_absent, mark_save_imported, record_caught, seed_from_catalog,
    set_content_completion, set_tracker_completion, upsert_game, upsert_progress,
    upsert_tracker_completed,
};
pub use queries::{
    content_for_game, creature_stats, creatures_for_game, get_game, get_progress, list_games,
    progress_for_user, tracker_entries, user_stats,
};
pub use schema::{SchemaError, open_database, open_memory};
