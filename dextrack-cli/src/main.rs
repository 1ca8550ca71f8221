//! dextrack CLI
//!
//! Command-line host for the save parser and the progress tracker database.

mod cli_types;
mod commands;
mod error;
mod progress_bar;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use dextrack_lib::{SettingOverrides, SettingSources, Settings};

use cli_types::*;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    let console = if cli.command.wants_json() {
        Console::Stderr
    } else {
        Console::Stdout
    };
    if let Err(e) = init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref(), console) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = cli.settings.overrides();
    let user = cli.user;

    match cli.command {
        Commands::Analyze { files, trace, json } => {
            let (settings, _) = load_settings(&overrides)?;
            commands::analyze::run_analyze(&settings, &files, trace, json)
        }
        Commands::Upload { game, file, json } => {
            let (settings, _) = load_settings(&overrides)?;
            let conn = open_store(&settings)?;
            commands::upload::run_upload(&conn, &settings, &user, game, &file, json)
        }
        Commands::BulkImport { dir, json } => {
            let (settings, _) = load_settings(&overrides)?;
            let conn = open_store(&settings)?;
            commands::bulk::run_bulk_import(&conn, &settings, &user, &dir, json, cli.quiet)
        }
        Commands::Games { action } => {
            let (settings, _) = load_settings(&overrides)?;
            match action {
                GamesAction::List => commands::games::run_games_list(&open_store(&settings)?),
                GamesAction::Show { id } => {
                    commands::games::run_games_show(&open_store(&settings)?, &user, id)
                }
                GamesAction::Seed => commands::games::run_games_seed(&settings),
            }
        }
        Commands::Progress { action } => {
            let (settings, _) = load_settings(&overrides)?;
            let conn = open_store(&settings)?;
            commands::progress::run_progress(&conn, &user, action)
        }
        Commands::Dex { action } => {
            let (settings, _) = load_settings(&overrides)?;
            let conn = open_store(&settings)?;
            commands::dex::run_dex(&conn, &user, action)
        }
        Commands::Stats => {
            let (settings, _) = load_settings(&overrides)?;
            commands::stats::run_stats(&open_store(&settings)?, &user)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (settings, sources) = load_settings(&overrides)?;
                commands::config::run_config_show(&settings, &sources);
                Ok(())
            }
            ConfigAction::Set { key, value } => commands::config::run_config_set(&key, &value),
            ConfigAction::Unset { key } => commands::config::run_config_unset(&key),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}

fn load_settings(overrides: &SettingOverrides) -> Result<(Settings, SettingSources), CliError> {
    let (settings, sources) = Settings::load(overrides)?;
    log::debug!("Using database {}", settings.database_path.display());
    Ok((settings, sources))
}

/// Open the database, seeding the catalog on first use.
pub(crate) fn open_store(settings: &Settings) -> Result<Connection, CliError> {
    let conn = dextrack_db::open_database(&settings.database_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            settings.database_path.display(),
            e
        ))
    })?;

    let games = dextrack_db::list_games(&conn)
        .map_err(|e| CliError::database(format!("Failed to read games: {}", e)))?;
    if games.is_empty() {
        log::info!(
            "Empty database, loading catalog from {}",
            settings.catalog_dir.display()
        );
        seed_catalog(&conn, &settings.catalog_dir)?;
    }

    Ok(conn)
}

pub(crate) fn seed_catalog(conn: &Connection, catalog_dir: &Path) -> Result<(), CliError> {
    if !catalog_dir.exists() {
        log::warn!(
            "Catalog directory not found at {}; no games loaded",
            catalog_dir.display(),
        );
        return Ok(());
    }
    let stats = dextrack_db::seed_from_catalog(conn, catalog_dir)
        .map_err(|e| CliError::database(format!("Failed to seed catalog: {}", e)))?;
    log::info!(
        "Seeded {} games ({} checklist entries) from {}",
        stats.games,
        stats.content_items,
        catalog_dir.display(),
    );
    Ok(())
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Stream that receives log lines on the terminal.
///
/// Commands printing `--json` keep stdout for the document itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Console {
    Stdout,
    Stderr,
}

/// Writes log lines to the console and, with ANSI codes stripped, to a file.
struct TeeWriter {
    console: Console,
    file: Option<File>,
}

impl TeeWriter {
    fn console(&self) -> Box<dyn Write> {
        match self.console {
            Console::Stdout => Box::new(std::io::stdout()),
            Console::Stderr => Box::new(std::io::stderr()),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.console().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.console().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Configure `env_logger` for the three output modes.
///
/// Normal output is bare messages at info level. `--verbose` adds
/// timestamps, levels and debug messages. `--quiet` keeps warnings and errors.
fn init_logging(
    quiet: bool,
    verbose: bool,
    logfile: Option<&Path>,
    console: Console,
) -> std::io::Result<()> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = logfile.map(File::create).transpose()?;

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module("rusqlite", LevelFilter::Warn)
        .target(env_logger::Target::Pipe(Box::new(TeeWriter { console, file })));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.init();
    Ok(())
}
