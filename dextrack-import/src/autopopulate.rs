//! Turn extracted save numbers into checklist, progress and creature rows.
//!
//! Work is split in two steps. [`plan_population`] is a pure function of the
//! extraction, the game's ordered checklist and the user's existing tracker
//! entries. [`auto_populate`] applies a plan inside one transaction.
//!
//! Population only ever adds completion: gyms beyond the badge count are left
//! alone and nothing is un-completed, so re-running the same save is a no-op.

use dextrack_catalog::roster::{caught_count, species_name};
use dextrack_catalog::types::*;
use dextrack_db::operations::{self, NewCreature, OperationError};
use dextrack_db::queries;
use dextrack_lib::ExtractionResult;
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulateError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Dex completion at or above this percentage completes the first
/// `pokemon_catch` checklist entry.
pub const DEX_MILESTONE_PERCENT: u8 = 10;

/// What a population run intends to write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulatePlan {
    /// Gym content ids to complete, in checklist order.
    pub gyms: Vec<i64>,
    /// Targeted gyms that are already complete.
    pub gyms_already_completed: usize,
    /// `pokemon_catch` entry to complete, if the milestone is reached and the
    /// entry isn't complete yet.
    pub dex_milestone: Option<i64>,
    pub dex_milestone_already_completed: bool,
    /// Roster entries to record as caught, `(dex number, name)`.
    pub creatures: Vec<(u32, &'static str)>,
}

/// Counters from one population run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulateStats {
    /// Gyms complete after the run among the first `badges` gyms.
    pub gyms_completed: usize,
    /// Of those, how many this run completed.
    pub gyms_newly_completed: usize,
    pub dex_milestone_completed: bool,
    pub creatures_inserted: usize,
    pub creatures_existing: usize,
    /// Rows that failed to write and were skipped.
    pub failures: usize,
}

/// One population request.
#[derive(Debug, Clone, Copy)]
pub struct PopulateRequest<'a> {
    pub user_id: &'a str,
    pub game: &'a Game,
    pub file_name: Option<&'a str>,
    pub extraction: &'a ExtractionResult,
}

/// Result of [`auto_populate`].
#[derive(Debug, Clone, Serialize)]
pub struct PopulateOutcome {
    pub progress: ProgressRecord,
    pub stats: PopulateStats,
}

/// Decide which rows a save's numbers call for.
///
/// `content` must be in checklist order and `existing` are the user's tracker
/// entries for the same game.
pub fn plan_population(
    extraction: &ExtractionResult,
    content: &[ContentItem],
    existing: &[TrackerEntry],
) -> PopulatePlan {
    let is_completed = |content_id: i64| {
        existing
            .iter()
            .any(|t| t.content_id == content_id && t.is_completed)
    };

    let mut plan = PopulatePlan::default();

    for gym in content
        .iter()
        .filter(|c| c.content_type == ContentType::Gym)
        .take(usize::from(extraction.badges))
    {
        if is_completed(gym.id) {
            plan.gyms_already_completed += 1;
        } else {
            plan.gyms.push(gym.id);
        }
    }

    if extraction.dex_completion_percent >= DEX_MILESTONE_PERCENT {
        let milestone = content
            .iter()
            .find(|c| c.content_type == ContentType::PokemonCatch);
        if let Some(item) = milestone {
            if is_completed(item.id) {
                plan.dex_milestone_already_completed = true;
            } else {
                plan.dex_milestone = Some(item.id);
            }
        }
    }

    plan.creatures = (1..=caught_count(extraction.dex_completion_percent))
        .filter_map(|n| species_name(n).map(|name| (n, name)))
        .collect();

    plan
}

/// Apply a save's numbers for (user, game) in one transaction.
///
/// The progress record is required; tracker and creature rows are best
/// effort: a failing row is logged, counted and skipped.
pub fn auto_populate(
    conn: &Connection,
    request: &PopulateRequest<'_>,
) -> Result<PopulateOutcome, PopulateError> {
    let tx = conn.unchecked_transaction()?;
    let game_id = request.game.id;
    let user_id = request.user_id;

    let progress = operations::mark_save_imported(&tx, user_id, game_id, request.file_name)?;

    let content = queries::content_for_game(&tx, game_id)?;
    let existing = queries::tracker_entries(&tx, user_id, game_id)?;
    let plan = plan_population(request.extraction, &content, &existing);

    let mut stats = PopulateStats {
        gyms_completed: plan.gyms_already_completed,
        dex_milestone_completed: plan.dex_milestone_already_completed,
        ..Default::default()
    };

    for &(creature_id, creature_name) in &plan.creatures {
        let creature = NewCreature {
            user_id,
            game_id,
            creature_id,
            creature_name,
            origin_game_id: Some(game_id),
            origin_game_name: Some(request.game.name.as_str()),
        };
        match operations::insert_creature_if_absent(&tx, &creature) {
            Ok(true) => stats.creatures_inserted += 1,
            Ok(false) => stats.creatures_existing += 1,
            Err(e) => {
                log::warn!("Could not record {} for {}: {}", creature_name, user_id, e);
                stats.failures += 1;
            }
        }
    }

    for &content_id in &plan.gyms {
        match operations::upsert_tracker_completed(&tx, user_id, game_id, content_id) {
            Ok(newly) => {
                stats.gyms_completed += 1;
                if newly {
                    stats.gyms_newly_completed += 1;
                }
            }
            Err(e) => {
                log::warn!("Could not complete gym entry {}: {}", content_id, e);
                stats.failures += 1;
            }
        }
    }

    if let Some(content_id) = plan.dex_milestone {
        match operations::upsert_tracker_completed(&tx, user_id, game_id, content_id) {
            Ok(_) => stats.dex_milestone_completed = true,
            Err(e) => {
                log::warn!("Could not complete dex entry {}: {}", content_id, e);
                stats.failures += 1;
            }
        }
    }

    tx.commit()?;

    log::debug!(
        "Auto-populated {} for {}: {} gyms ({} new), {} creatures added",
        request.game.name,
        user_id,
        stats.gyms_completed,
        stats.gyms_newly_completed,
        stats.creatures_inserted
    );

    Ok(PopulateOutcome { progress, stats })
}
