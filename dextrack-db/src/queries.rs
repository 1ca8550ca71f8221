//! Read queries for the tracker database.

use std::collections::HashMap;

use dextrack_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

// ── Game Queries ────────────────────────────────────────────────────────────

/// List all games, oldest release first.
pub fn list_games(conn: &Connection) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, platform, generation, release_year, completion_time_hours
         FROM games ORDER BY release_year, id",
    )?;
    let rows = stmt.query_map([], map_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Look up a game by id.
pub fn get_game(conn: &Connection, id: i64) -> Result<Option<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, platform, generation, release_year, completion_time_hours
         FROM games WHERE id = ?1",
    )?;
    match stmt.query_row(params![id], map_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Checklist entries for a game in catalog order.
pub fn content_for_game(conn: &Connection, game_id: i64) -> Result<Vec<ContentItem>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, name, content_type, order_num, description
         FROM game_content WHERE game_id = ?1 ORDER BY order_num, id",
    )?;
    let rows = stmt.query_map(params![game_id], |row| {
        Ok(ContentItem {
            id: row.get(0)?,
            game_id: row.get(1)?,
            name: row.get(2)?,
            content_type: ContentType::from(row.get::<_, String>(3)?),
            order_num: row.get(4)?,
            description: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Progress Queries ────────────────────────────────────────────────────────

const PROGRESS_COLUMNS: &str = "id, user_id, game_id, status, save_file_imported, save_file_name,
     started_at, completed_at, created_at, updated_at";

/// All progress records of a user, newest first.
pub fn progress_for_user(conn: &Connection, user_id: &str) -> Result<Vec<ProgressRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM user_progress
         WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![user_id], map_progress)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Progress record for (user, game), if any.
pub fn get_progress(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
) -> Result<Option<ProgressRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = ?1 AND game_id = ?2"
    ))?;
    match stmt.query_row(params![user_id, game_id], map_progress) {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Tracker Queries ─────────────────────────────────────────────────────────

/// Tracker entries of a user for one game, in checklist order.
pub fn tracker_entries(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
) -> Result<Vec<TrackerEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.user_id, t.game_id, t.content_id, t.is_completed, t.completed_at, t.updated_at
         FROM game_content_tracker t
         JOIN game_content c ON c.id = t.content_id
         WHERE t.user_id = ?1 AND t.game_id = ?2
         ORDER BY c.order_num, c.id",
    )?;
    let rows = stmt.query_map(params![user_id, game_id], map_tracker)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub(crate) fn get_tracker_entry(
    conn: &Connection,
    tracker_id: i64,
) -> Result<Option<TrackerEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, game_id, content_id, is_completed, completed_at, updated_at
         FROM game_content_tracker WHERE id = ?1",
    )?;
    match stmt.query_row(params![tracker_id], map_tracker) {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Creature Queries ────────────────────────────────────────────────────────

/// Creatures a user has recorded for a game, by name.
pub fn creatures_for_game(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
) -> Result<Vec<CaughtCreature>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT user_id, game_id, pokemon_id, pokemon_name, origin_game_id, origin_game_name, caught_at
         FROM user_pokemon WHERE user_id = ?1 AND game_id = ?2
         ORDER BY pokemon_name, pokemon_id",
    )?;
    let rows = stmt.query_map(params![user_id, game_id], map_creature)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Per-origin-game breakdown and totals of a user's creatures.
pub fn creature_stats(conn: &Connection, user_id: &str) -> Result<CreatureStats, OperationError> {
    let mut names: HashMap<Option<String>, Vec<String>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT origin_game_name, pokemon_name FROM user_pokemon
             WHERE user_id = ?1 ORDER BY pokemon_name",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (origin, name) = row?;
            names.entry(origin).or_default().push(name);
        }
    }

    let mut stmt = conn.prepare(
        "SELECT origin_game_name, COUNT(*) FROM user_pokemon
         WHERE user_id = ?1
         GROUP BY origin_game_name
         ORDER BY COUNT(*) DESC, origin_game_name",
    )?;
    let groups = stmt
        .query_map(params![user_id], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let by_origin = groups
        .into_iter()
        .map(|(origin, count)| OriginGameStats {
            creatures: names.remove(&origin).unwrap_or_default(),
            origin_game_name: origin,
            count: count as u64,
        })
        .collect();

    let totals = conn.query_row(
        "SELECT COUNT(DISTINCT pokemon_id), COUNT(*), COUNT(DISTINCT game_id),
                COUNT(DISTINCT origin_game_id)
         FROM user_pokemon WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(CreatureTotals {
                unique_caught: row.get::<_, i64>(0)? as u64,
                total_entries: row.get::<_, i64>(1)? as u64,
                games_with_creatures: row.get::<_, i64>(2)? as u64,
                origin_games: row.get::<_, i64>(3)? as u64,
            })
        },
    )?;

    Ok(CreatureStats { by_origin, totals })
}

// ── User Statistics ─────────────────────────────────────────────────────────

/// Game counts per status and hours spent on completed games.
pub fn user_stats(conn: &Connection, user_id: &str) -> Result<UserStats, OperationError> {
    let stats = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN p.status = 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN p.status = 'in_progress' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN p.status = 'paused' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN p.status = 'not_started' THEN 1 ELSE 0 END), 0),
                COALESCE(ROUND(SUM(CASE WHEN p.status = 'completed'
                    THEN g.completion_time_hours END)), 0)
         FROM user_progress p
         JOIN games g ON g.id = p.game_id
         WHERE p.user_id = ?1",
        params![user_id],
        |row| {
            Ok(UserStats {
                total_games: row.get::<_, i64>(0)? as u64,
                completed_games: row.get::<_, i64>(1)? as u64,
                in_progress_games: row.get::<_, i64>(2)? as u64,
                paused_games: row.get::<_, i64>(3)? as u64,
                not_started_games: row.get::<_, i64>(4)? as u64,
                total_hours_completed: row.get::<_, f64>(5)? as u64,
            })
        },
    )?;
    Ok(stats)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn map_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
        platform: row.get(2)?,
        generation: row.get(3)?,
        release_year: row.get(4)?,
        completion_time_hours: row.get(5)?,
    })
}

pub(crate) fn map_progress(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProgressRecord> {
    let status: String = row.get(3)?;
    let status = status.parse::<ProgressStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
    })?;
    Ok(ProgressRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        game_id: row.get(2)?,
        status,
        save_file_imported: row.get(4)?,
        save_file_name: row.get(5)?,
        started_at: row.get(6)?,
        completed_at: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn map_tracker(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrackerEntry> {
    Ok(TrackerEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        game_id: row.get(2)?,
        content_id: row.get(3)?,
        is_completed: row.get(4)?,
        completed_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub(crate) fn map_creature(row: &rusqlite::Row<'_>) -> rusqlite::Result<CaughtCreature> {
    Ok(CaughtCreature {
        user_id: row.get(0)?,
        game_id: row.get(1)?,
        creature_id: row.get(2)?,
        creature_name: row.get(3)?,
        origin_game_id: row.get(4)?,
        origin_game_name: row.get(5)?,
        caught_at: row.get(6)?,
    })
}
