use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_catalog::species_name;
use dextrack_db::NewCreature;

use super::require_game;
use crate::CliError;
use crate::cli_types::DexAction;

pub(crate) fn run_dex(conn: &Connection, user: &str, action: DexAction) -> Result<(), CliError> {
    match action {
        DexAction::List { game } => run_dex_list(conn, user, game),
        DexAction::Record {
            game,
            number,
            name,
            origin,
        } => run_dex_record(conn, user, game, number, name, origin),
        DexAction::Delete { game } => {
            let game = require_game(conn, game)?;
            let deleted = dextrack_db::delete_creatures(conn, user, game.id)
                .map_err(|e| CliError::database(e.to_string()))?;
            log::info!("Deleted {} Pokémon from {}", deleted, game.name);
            Ok(())
        }
        DexAction::Stats => run_dex_stats(conn, user),
    }
}

fn run_dex_list(conn: &Connection, user: &str, game_id: i64) -> Result<(), CliError> {
    let game = require_game(conn, game_id)?;
    let creatures = dextrack_db::creatures_for_game(conn, user, game_id)
        .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} ({} caught)",
        game.name.if_supports_color(Stdout, |t| t.bold()),
        creatures.len()
    );
    for c in &creatures {
        let origin = match &c.origin_game_name {
            Some(name) if c.origin_game_id != Some(game_id) => format!(" from {}", name),
            _ => String::new(),
        };
        log::info!(
            "  #{:03} {}{}",
            c.creature_id,
            c.creature_name,
            origin.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    Ok(())
}

fn run_dex_record(
    conn: &Connection,
    user: &str,
    game_id: i64,
    number: u32,
    name: Option<String>,
    origin: Option<i64>,
) -> Result<(), CliError> {
    let game = require_game(conn, game_id)?;
    let origin_game = match origin {
        Some(id) if id != game_id => require_game(conn, id)?,
        _ => game.clone(),
    };
    let name = match name.or_else(|| species_name(number).map(str::to_string)) {
        Some(n) => n,
        None => {
            return Err(CliError::other(format!(
                "No roster name for #{}; pass --name",
                number
            )));
        }
    };

    let caught = dextrack_db::record_caught(
        conn,
        &NewCreature {
            user_id: user,
            game_id,
            creature_id: number,
            creature_name: &name,
            origin_game_id: Some(origin_game.id),
            origin_game_name: Some(origin_game.name.as_str()),
        },
    )
    .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} Recorded #{:03} {} in {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        caught.creature_id,
        caught.creature_name.if_supports_color(Stdout, |t| t.bold()),
        game.name,
    );
    Ok(())
}

fn run_dex_stats(conn: &Connection, user: &str) -> Result<(), CliError> {
    let stats =
        dextrack_db::creature_stats(conn, user).map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{}",
        "Caught Pokémon".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Unique species:   {:>6}", stats.totals.unique_caught);
    log::info!("  Total entries:    {:>6}", stats.totals.total_entries);
    log::info!("  Games:            {:>6}", stats.totals.games_with_creatures);
    log::info!("  Origin games:     {:>6}", stats.totals.origin_games);

    if stats.by_origin.is_empty() {
        return Ok(());
    }
    crate::log_blank();
    log::info!("By origin:");
    for group in &stats.by_origin {
        let origin = group.origin_game_name.as_deref().unwrap_or("Unknown origin");
        log::info!(
            "  {} {}",
            format!("{:<24}", origin).if_supports_color(Stdout, |t| t.cyan()),
            group.count
        );
        log::debug!("    {}", group.creatures.join(", "));
    }
    Ok(())
}
