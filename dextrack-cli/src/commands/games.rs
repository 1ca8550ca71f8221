use std::collections::HashMap;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_lib::Settings;

use super::{require_game, truncate_str};
use crate::CliError;

/// List catalog games in release order.
pub(crate) fn run_games_list(conn: &Connection) -> Result<(), CliError> {
    let games = dextrack_db::list_games(conn).map_err(|e| CliError::database(e.to_string()))?;

    if games.is_empty() {
        log::info!("No games in the catalog. Run 'dextrack games seed' to load it.");
        return Ok(());
    }

    let mut current_platform = "";
    for game in &games {
        if game.platform != current_platform {
            if !current_platform.is_empty() {
                crate::log_blank();
            }
            current_platform = game.platform.as_str();
            log::info!(
                "{}:",
                current_platform.if_supports_color(Stdout, |t| t.bold())
            );
        }
        log::info!(
            "  {:>3}  {:<28} {}",
            game.id,
            truncate_str(&game.name, 28),
            game.release_year
                .map(|y| y.to_string())
                .unwrap_or_default()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Show a game's checklist with the user's completion state.
pub(crate) fn run_games_show(conn: &Connection, user: &str, game_id: i64) -> Result<(), CliError> {
    let game = require_game(conn, game_id)?;
    let content =
        dextrack_db::content_for_game(conn, game_id).map_err(|e| CliError::database(e.to_string()))?;
    let tracker = dextrack_db::tracker_entries(conn, user, game_id)
        .map_err(|e| CliError::database(e.to_string()))?;
    let progress = dextrack_db::get_progress(conn, user, game_id)
        .map_err(|e| CliError::database(e.to_string()))?;

    let by_content: HashMap<i64, _> = tracker.iter().map(|t| (t.content_id, t)).collect();

    log::info!(
        "{} [{}]",
        game.name.if_supports_color(Stdout, |t| t.bold()),
        game.platform.if_supports_color(Stdout, |t| t.cyan()),
    );
    if let Some(hours) = game.completion_time_hours {
        log::info!("  Typical completion: {}h", hours);
    }
    match &progress {
        Some(p) => log::info!(
            "  Status: {}{}",
            p.status,
            if p.save_file_imported {
                " (save imported)"
            } else {
                ""
            }
        ),
        None => log::info!("  Status: not tracked"),
    }
    crate::log_blank();

    let done = content
        .iter()
        .filter(|c| by_content.get(&c.id).is_some_and(|t| t.is_completed))
        .count();
    log::info!("Checklist ({}/{}):", done, content.len());

    for item in &content {
        let mark = if by_content.get(&item.id).is_some_and(|t| t.is_completed) {
            format!("{}", "[x]".if_supports_color(Stdout, |t| t.green()))
        } else {
            "[ ]".to_string()
        };
        log::info!(
            "  {} {:>4}  {:<36} {}",
            mark,
            item.id,
            truncate_str(&item.name, 36),
            item.content_type.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Load the YAML catalog into the database.
pub(crate) fn run_games_seed(settings: &Settings) -> Result<(), CliError> {
    let conn = dextrack_db::open_database(&settings.database_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            settings.database_path.display(),
            e
        ))
    })?;
    crate::seed_catalog(&conn, &settings.catalog_dir)
}
