use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_import::{SaveUpload, UploadOutcome, upload_save};
use dextrack_lib::Settings;

use crate::CliError;

/// Upload one save file into a chosen game.
pub(crate) fn run_upload(
    conn: &Connection,
    settings: &Settings,
    user: &str,
    game_id: i64,
    file: &Path,
    json: bool,
) -> Result<(), CliError> {
    let size = std::fs::metadata(file)?.len();
    if size > settings.max_upload_bytes {
        return Err(CliError::TooLarge {
            path: file.display().to_string(),
            size,
            limit: settings.max_upload_bytes,
        });
    }

    let upload = SaveUpload::from_path(file)?;
    let outcome = upload_save(conn, settings, user, game_id, Some(upload))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &UploadOutcome) {
    log::info!(
        "{} Imported {} into {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        outcome.file_name.if_supports_color(Stdout, |t| t.bold()),
        outcome.target_game.name.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Format:        {}", outcome.format);
    log::info!("  Detected game: {}", outcome.detected_game);
    if let Some(warning) = &outcome.validation_warning {
        log::warn!("  {}", warning.if_supports_color(Stdout, |t| t.yellow()));
    }
    crate::log_blank();
    log::info!(
        "  Badges:        {} ({} gyms complete, {} new)",
        outcome.extraction.badges,
        outcome.auto_populated.gyms_completed,
        outcome.stats.gyms_newly_completed,
    );
    log::info!(
        "  Dex:           {}%{}",
        outcome.auto_populated.dex_progress,
        if outcome.stats.dex_milestone_completed {
            " (milestone complete)"
        } else {
            ""
        },
    );
    log::info!(
        "  Pokémon:       {} added, {} already recorded",
        outcome.stats.creatures_inserted,
        outcome.stats.creatures_existing,
    );
    log::info!("  Playtime:      {}h", outcome.extraction.playtime_hours);
    if outcome.stats.failures > 0 {
        log::warn!("  {} rows could not be written", outcome.stats.failures);
    }
    for d in &outcome.degradations {
        log::debug!("  note: {}", d);
    }
}
