//! Write operations: catalog seeding, progress, tracker and creature upserts.
//!
//! Every write keyed by a natural key uses `INSERT ... ON CONFLICT`, so
//! repeated calls converge on the same rows.

use dextrack_catalog::types::*;
use dextrack_catalog::yaml::YamlError;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::queries::{get_progress, get_tracker_entry, map_progress};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog error: {0}")]
    Catalog(#[from] YamlError),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert or update a game and its checklist from catalog data.
///
/// Content entries are keyed by (game, name); their order defaults to the
/// 1-based position in the YAML list. Returns the number of content entries
/// written.
pub fn upsert_game(conn: &Connection, game: &CatalogGame) -> Result<usize, OperationError> {
    conn.execute(
        "INSERT INTO games (id, name, platform, generation, release_year, completion_time_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             platform = excluded.platform,
             generation = excluded.generation,
             release_year = excluded.release_year,
             completion_time_hours = excluded.completion_time_hours",
        params![
            game.id,
            game.name,
            game.platform,
            game.generation,
            game.release_year,
            game.completion_time_hours,
        ],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO game_content (game_id, name, content_type, order_num, description)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(game_id, name) DO UPDATE SET
             content_type = excluded.content_type,
             order_num = excluded.order_num,
             description = excluded.description",
    )?;
    for (i, item) in game.content.iter().enumerate() {
        let order = item.order.unwrap_or(i as i64 + 1);
        stmt.execute(params![
            game.id,
            item.name,
            item.content_type.as_str(),
            order,
            item.description,
        ])?;
    }

    Ok(game.content.len())
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Load all YAML catalog games into the database.
///
/// Safe to call repeatedly (uses upsert). Runs in one transaction.
pub fn seed_from_catalog(
    conn: &Connection,
    catalog_dir: &std::path::Path,
) -> Result<SeedStats, OperationError> {
    let games = dextrack_catalog::yaml::load_catalog(catalog_dir)?;

    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();
    for game in &games {
        stats.content_items += upsert_game(&tx, game)?;
        stats.games += 1;
    }
    tx.commit()?;

    log::debug!(
        "Seeded {} games ({} checklist entries) from {}",
        stats.games,
        stats.content_items,
        catalog_dir.display()
    );
    Ok(stats)
}

/// Statistics from seeding the database.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub games: usize,
    pub content_items: usize,
}

// ── Progress Operations ─────────────────────────────────────────────────────

/// Mark a save file as imported for (user, game).
///
/// Creates an `in_progress` record with `started_at = now` when none exists.
/// An existing record keeps its status; only the import flag and (when given)
/// the file name change.
pub fn mark_save_imported(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
    file_name: Option<&str>,
) -> Result<ProgressRecord, OperationError> {
    conn.execute(
        "INSERT INTO user_progress (user_id, game_id, status, save_file_imported, save_file_name, started_at)
         VALUES (?1, ?2, 'in_progress', 1, ?3, datetime('now'))
         ON CONFLICT(user_id, game_id) DO UPDATE SET
             save_file_imported = 1,
             save_file_name = COALESCE(excluded.save_file_name, save_file_name),
             updated_at = datetime('now')",
        params![user_id, game_id, file_name],
    )?;
    get_progress(conn, user_id, game_id)?
        .ok_or_else(|| OperationError::not_found("progress", format!("{user_id}/{game_id}")))
}

/// Create or update the progress record for (user, game).
pub fn upsert_progress(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
    status: ProgressStatus,
    started_at: Option<&str>,
    completed_at: Option<&str>,
) -> Result<ProgressRecord, OperationError> {
    let mut stmt = conn.prepare(
        "INSERT INTO user_progress (user_id, game_id, status, started_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, game_id) DO UPDATE SET
             status = excluded.status,
             started_at = excluded.started_at,
             completed_at = excluded.completed_at,
             updated_at = datetime('now')
         RETURNING id, user_id, game_id, status, save_file_imported, save_file_name,
                   started_at, completed_at, created_at, updated_at",
    )?;
    let record = stmt.query_row(
        params![user_id, game_id, status.as_str(), started_at, completed_at],
        map_progress,
    )?;
    Ok(record)
}

/// Rows removed by [`clear_user_progress`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearStats {
    pub tracker_entries: usize,
    pub progress_records: usize,
}

/// Delete every tracker entry and progress record of a user.
///
/// Caught creatures are kept.
pub fn clear_user_progress(conn: &Connection, user_id: &str) -> Result<ClearStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let tracker_entries = tx.execute(
        "DELETE FROM game_content_tracker WHERE user_id = ?1",
        params![user_id],
    )?;
    let progress_records =
        tx.execute("DELETE FROM user_progress WHERE user_id = ?1", params![user_id])?;
    tx.commit()?;
    Ok(ClearStats {
        tracker_entries,
        progress_records,
    })
}

// ── Tracker Operations ──────────────────────────────────────────────────────

/// Mark a checklist entry completed for a user.
///
/// Never un-completes and keeps the first `completed_at`. Returns `true` when
/// the entry was not already completed.
pub fn upsert_tracker_completed(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
    content_id: i64,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO game_content_tracker (user_id, game_id, content_id, is_completed, completed_at)
         VALUES (?1, ?2, ?3, 1, datetime('now'))
         ON CONFLICT(user_id, content_id) DO UPDATE SET
             is_completed = 1,
             completed_at = COALESCE(completed_at, excluded.completed_at),
             updated_at = datetime('now')
         WHERE is_completed = 0",
        params![user_id, game_id, content_id],
    )?;
    Ok(changed > 0)
}

/// Set a tracker entry's completion by id.
///
/// This is the manual toggle, so it may un-complete an entry.
pub fn set_tracker_completion(
    conn: &Connection,
    tracker_id: i64,
    completed: bool,
) -> Result<TrackerEntry, OperationError> {
    let changed = conn.execute(
        "UPDATE game_content_tracker SET
             is_completed = ?2,
             completed_at = CASE WHEN ?2 THEN COALESCE(completed_at, datetime('now')) ELSE NULL END,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![tracker_id, completed],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("tracker entry", tracker_id));
    }
    get_tracker_entry(conn, tracker_id)?
        .ok_or_else(|| OperationError::not_found("tracker entry", tracker_id))
}

/// Set completion of a checklist entry for a user, creating the tracker row
/// when missing. Returns the resulting entry.
pub fn set_content_completion(
    conn: &Connection,
    user_id: &str,
    content_id: i64,
    completed: bool,
) -> Result<TrackerEntry, OperationError> {
    let game_id: i64 = match conn.query_row(
        "SELECT game_id FROM game_content WHERE id = ?1",
        params![content_id],
        |row| row.get(0),
    ) {
        Ok(id) => id,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(OperationError::not_found("content", content_id));
        }
        Err(e) => return Err(e.into()),
    };

    let tracker_id: i64 = conn.query_row(
        "INSERT INTO game_content_tracker (user_id, game_id, content_id, is_completed, completed_at)
         VALUES (?1, ?2, ?3, ?4, CASE WHEN ?4 THEN datetime('now') END)
         ON CONFLICT(user_id, content_id) DO UPDATE SET
             is_completed = excluded.is_completed,
             completed_at = CASE WHEN excluded.is_completed
                 THEN COALESCE(completed_at, datetime('now')) ELSE NULL END,
             updated_at = datetime('now')
         RETURNING id",
        params![user_id, game_id, content_id, completed],
        |row| row.get(0),
    )?;
    get_tracker_entry(conn, tracker_id)?
        .ok_or_else(|| OperationError::not_found("tracker entry", tracker_id))
}

// ── Creature Operations ─────────────────────────────────────────────────────

/// A creature row to write.
#[derive(Debug, Clone, Copy)]
pub struct NewCreature<'a> {
    pub user_id: &'a str,
    pub game_id: i64,
    pub creature_id: u32,
    pub creature_name: &'a str,
    pub origin_game_id: Option<i64>,
    pub origin_game_name: Option<&'a str>,
}

/// Insert a caught creature unless (user, game, creature) already exists.
///
/// Returns `true` when a row was inserted.
pub fn insert_creature_if_absent(
    conn: &Connection,
    creature: &NewCreature<'_>,
) -> Result<bool, OperationError> {
    let inserted = conn.execute(
        "INSERT INTO user_pokemon (user_id, game_id, pokemon_id, pokemon_name, origin_game_id, origin_game_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id, game_id, pokemon_id) DO NOTHING",
        params![
            creature.user_id,
            creature.game_id,
            creature.creature_id,
            creature.creature_name,
            creature.origin_game_id,
            creature.origin_game_name,
        ],
    )?;
    Ok(inserted > 0)
}

/// Record a caught creature, refreshing its origin when it already exists.
pub fn record_caught(
    conn: &Connection,
    creature: &NewCreature<'_>,
) -> Result<CaughtCreature, OperationError> {
    let mut stmt = conn.prepare(
        "INSERT INTO user_pokemon (user_id, game_id, pokemon_id, pokemon_name, origin_game_id, origin_game_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id, game_id, pokemon_id) DO UPDATE SET
             origin_game_id = excluded.origin_game_id,
             origin_game_name = excluded.origin_game_name
         RETURNING user_id, game_id, pokemon_id, pokemon_name, origin_game_id, origin_game_name, caught_at",
    )?;
    let row = stmt.query_row(
        params![
            creature.user_id,
            creature.game_id,
            creature.creature_id,
            creature.creature_name,
            creature.origin_game_id,
            creature.origin_game_name,
        ],
        crate::queries::map_creature,
    )?;
    Ok(row)
}

/// Delete all creatures a user has recorded for a game.
pub fn delete_creatures(conn: &Connection, user_id: &str, game_id: i64) -> Result<usize, OperationError> {
    let deleted = conn.execute(
        "DELETE FROM user_pokemon WHERE user_id = ?1 AND game_id = ?2",
        params![user_id, game_id],
    )?;
    Ok(deleted)
}
