use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_import::{BulkOptions, ImportProgress, bulk_import, collect_files};
use dextrack_lib::{SaveFileParser, Settings};

use crate::CliError;
use crate::progress_bar::BarProgress;

/// Import every save file in a directory.
pub(crate) fn run_bulk_import(
    conn: &Connection,
    settings: &Settings,
    user: &str,
    dir: &Path,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let files = collect_files(dir).map_err(|e| CliError::other(e.to_string()))?;
    if files.is_empty() {
        log::info!(
            "{}",
            format!("No files found in {}", dir.display()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    if !json {
        log::info!(
            "Importing {} files from {}",
            files.len(),
            dir.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    let options = BulkOptions {
        user_id: user.to_string(),
        policy: settings.game_match_policy,
        max_file_bytes: settings.max_upload_bytes,
    };
    // JSON output owns stdout, so per-file lines are not logged
    let bar = BarProgress::new(files.len(), quiet);
    let progress: Option<&dyn ImportProgress> = if json { None } else { Some(&bar) };
    let report = bulk_import(
        conn,
        &SaveFileParser::standard(),
        &files,
        &options,
        progress,
    )
    .map_err(|e| CliError::database(e.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.stats.unmatched > 0 {
        crate::log_blank();
        log::info!("Unmatched files can be imported with 'dextrack upload --game <id> <file>'.");
    }
    Ok(())
}
