use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use crate::CliError;

pub(crate) fn run_stats(conn: &Connection, user: &str) -> Result<(), CliError> {
    let stats =
        dextrack_db::user_stats(conn, user).map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{}",
        format!("Statistics for {}", user).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Games tracked:   {:>6}", stats.total_games);
    log::info!("  Completed:       {:>6}", stats.completed_games);
    log::info!("  In progress:     {:>6}", stats.in_progress_games);
    log::info!("  Paused:          {:>6}", stats.paused_games);
    log::info!("  Not started:     {:>6}", stats.not_started_games);
    crate::log_blank();
    log::info!(
        "  Hours (completed games): {}",
        stats.total_hours_completed
    );
    Ok(())
}
