pub(crate) mod analyze;
pub(crate) mod bulk;
pub(crate) mod config;
pub(crate) mod dex;
pub(crate) mod games;
pub(crate) mod progress;
pub(crate) mod stats;
pub(crate) mod upload;

use dextrack_catalog::Game;
use rusqlite::Connection;

use crate::CliError;

/// Look up a game or fail with a readable message.
pub(crate) fn require_game(conn: &Connection, game_id: i64) -> Result<Game, CliError> {
    dextrack_db::get_game(conn, game_id)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| {
            CliError::other(format!(
                "No game with id {}. Run 'dextrack games list' to see the catalog.",
                game_id
            ))
        })
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
