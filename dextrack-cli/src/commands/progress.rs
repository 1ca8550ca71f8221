use std::collections::HashMap;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_catalog::{ProgressStatus, TrackerEntry};
use dextrack_import::{ManualStats, record_manual_stats};

use super::require_game;
use crate::CliError;
use crate::cli_types::{ManualStatsArgs, ProgressAction};

pub(crate) fn run_progress(
    conn: &Connection,
    user: &str,
    action: ProgressAction,
) -> Result<(), CliError> {
    match action {
        ProgressAction::List => run_progress_list(conn, user),
        ProgressAction::Set {
            game,
            status,
            started,
            completed,
        } => run_progress_set(
            conn,
            user,
            game,
            status,
            started.as_deref(),
            completed.as_deref(),
        ),
        ProgressAction::Manual { stats } => run_progress_manual(conn, user, &stats),
        ProgressAction::Check { content_id, undo } => {
            let entry = dextrack_db::set_content_completion(conn, user, content_id, !undo)
                .map_err(|e| CliError::database(e.to_string()))?;
            print_entry(&entry);
            Ok(())
        }
        ProgressAction::Toggle { tracker_id, undo } => {
            let entry = dextrack_db::set_tracker_completion(conn, tracker_id, !undo)
                .map_err(|e| CliError::database(e.to_string()))?;
            print_entry(&entry);
            Ok(())
        }
        ProgressAction::Clear { confirm } => run_progress_clear(conn, user, confirm),
    }
}

fn run_progress_list(conn: &Connection, user: &str) -> Result<(), CliError> {
    let records =
        dextrack_db::progress_for_user(conn, user).map_err(|e| CliError::database(e.to_string()))?;
    if records.is_empty() {
        log::info!("No progress recorded for {}", user);
        return Ok(());
    }

    let names: HashMap<i64, String> = dextrack_db::list_games(conn)
        .map_err(|e| CliError::database(e.to_string()))?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();

    log::info!(
        "{}",
        format!("Progress for {}", user).if_supports_color(Stdout, |t| t.bold())
    );
    for record in &records {
        let name = names
            .get(&record.game_id)
            .map(String::as_str)
            .unwrap_or("?");
        let status = match record.status {
            ProgressStatus::Completed => {
                format!("{}", record.status.if_supports_color(Stdout, |t| t.green()))
            }
            ProgressStatus::InProgress => {
                format!("{}", record.status.if_supports_color(Stdout, |t| t.cyan()))
            }
            _ => record.status.to_string(),
        };
        log::info!(
            "  {:>3}  {:<24} {:<12} {}",
            record.game_id,
            name,
            status,
            record
                .save_file_name
                .as_deref()
                .unwrap_or("")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

fn run_progress_set(
    conn: &Connection,
    user: &str,
    game_id: i64,
    status: ProgressStatus,
    started: Option<&str>,
    completed: Option<&str>,
) -> Result<(), CliError> {
    let game = require_game(conn, game_id)?;
    let record = dextrack_db::upsert_progress(conn, user, game_id, status, started, completed)
        .map_err(|e| CliError::database(e.to_string()))?;
    log::info!(
        "{} {} is now {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.name,
        record.status.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

fn run_progress_manual(
    conn: &Connection,
    user: &str,
    args: &ManualStatsArgs,
) -> Result<(), CliError> {
    let stats = ManualStats {
        hours_played: args.hours,
        creatures_caught: args.caught,
        dex_completion_percent: args.dex,
        badges: args.badges,
    };
    let outcome = record_manual_stats(conn, user, args.game, stats)?;
    log::info!(
        "{} Recorded stats for game {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        outcome.progress.game_id,
        outcome.progress.status,
    );
    let show = |label: &str, value: Option<String>| {
        if let Some(v) = value {
            log::info!("  {:<10} {}", label, v);
        }
    };
    show("Hours:", stats.hours_played.map(|v| v.to_string()));
    show("Caught:", stats.creatures_caught.map(|v| v.to_string()));
    show("Dex:", stats.dex_completion_percent.map(|v| format!("{}%", v)));
    show("Badges:", stats.badges.map(|v| v.to_string()));
    Ok(())
}

fn run_progress_clear(conn: &Connection, user: &str, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will delete every progress record and checklist entry for '{}'.",
            user
        );
        log::info!("Caught Pokémon are kept. Re-run with --confirm to proceed:");
        log::info!("  dextrack --user {} progress clear --confirm", user);
        return Ok(());
    }

    let stats = dextrack_db::clear_user_progress(conn, user)
        .map_err(|e| CliError::database(e.to_string()))?;
    log::info!(
        "{}",
        "Progress cleared.".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Progress records: {}", stats.progress_records);
    log::info!("  Checklist entries: {}", stats.tracker_entries);
    Ok(())
}

fn print_entry(entry: &TrackerEntry) {
    let state = if entry.is_completed {
        format!("{}", "complete".if_supports_color(Stdout, |t| t.green()))
    } else {
        "not complete".to_string()
    };
    log::info!(
        "Tracker entry {} (checklist item {}): {}",
        entry.id,
        entry.content_id,
        state
    );
}
