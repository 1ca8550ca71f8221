//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use dextrack_catalog::ProgressStatus;
use dextrack_lib::{GameMatchPolicy, SettingOverrides};

#[derive(Parser)]
#[command(name = "dextrack")]
#[command(about = "Track Pokémon game progress from save files", long_about = None)]
pub(crate) struct Cli {
    /// User whose progress is read or written
    #[arg(short, long, global = true, default_value = "local")]
    pub user: String,

    #[command(flatten)]
    pub settings: SettingArgs,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Per-invocation overrides of values from `settings.toml`.
#[derive(Args, Clone, Default)]
pub(crate) struct SettingArgs {
    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory holding games/*.yaml
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// How to treat a save whose detected game differs from the chosen one
    #[arg(long, global = true, value_name = "advisory|strict")]
    pub game_match: Option<GameMatchPolicy>,

    /// Largest save file accepted, in bytes
    #[arg(long, global = true)]
    pub max_upload_bytes: Option<u64>,
}

impl SettingArgs {
    pub(crate) fn overrides(&self) -> SettingOverrides {
        SettingOverrides {
            database_path: self.db.clone(),
            catalog_dir: self.catalog_dir.clone(),
            game_match_policy: self.game_match,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Parse save files and print what was recovered, without touching the database
    Analyze {
        /// Save files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show every offset probed while extracting
        #[arg(long)]
        trace: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import a save file into a chosen game
    Upload {
        /// Catalog game id (see `dextrack games list`)
        #[arg(short, long)]
        game: i64,

        /// Save file
        file: PathBuf,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import every save file in a directory, matching each to a game automatically
    BulkImport {
        /// Directory containing .sav / .3ds files
        dir: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the game catalog
    Games {
        #[command(subcommand)]
        action: GamesAction,
    },

    /// Manage per-game progress records and checklist entries
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// Manage caught Pokémon
    Dex {
        #[command(subcommand)]
        action: DexAction,
    },

    /// Show a summary of the user's games
    Stats,

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// Whether the command prints a JSON document on stdout.
    pub(crate) fn wants_json(&self) -> bool {
        matches!(
            self,
            Commands::Analyze { json: true, .. }
                | Commands::Upload { json: true, .. }
                | Commands::BulkImport { json: true, .. }
        )
    }
}

#[derive(Subcommand)]
pub(crate) enum GamesAction {
    /// List catalog games by release year
    List,

    /// Show a game's checklist and the user's completion
    Show {
        /// Catalog game id
        id: i64,
    },

    /// Load (or refresh) the catalog from YAML into the database
    Seed,
}

#[derive(Subcommand)]
pub(crate) enum ProgressAction {
    /// List the user's progress records, newest first
    List,

    /// Create or update a progress record
    Set {
        /// Catalog game id
        #[arg(short, long)]
        game: i64,

        /// not_started, in_progress, completed or paused
        #[arg(short, long)]
        status: ProgressStatus,

        /// Start date (free text, e.g. 2024-05-01)
        #[arg(long)]
        started: Option<String>,

        /// Completion date
        #[arg(long)]
        completed: Option<String>,
    },

    /// Record hand-entered stats instead of uploading a save
    Manual {
        #[command(flatten)]
        stats: ManualStatsArgs,
    },

    /// Mark a checklist entry complete (or incomplete with --undo)
    Check {
        /// Checklist entry id (see `dextrack games show`)
        content_id: i64,

        #[arg(long)]
        undo: bool,
    },

    /// Toggle a tracker entry by its own id
    Toggle {
        /// Tracker entry id
        tracker_id: i64,

        /// Mark incomplete instead of complete
        #[arg(long)]
        undo: bool,
    },

    /// Delete all progress and checklist entries for the user
    Clear {
        /// Actually delete (otherwise just describe what would happen)
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Args, Clone)]
pub(crate) struct ManualStatsArgs {
    /// Catalog game id
    #[arg(short, long)]
    pub game: i64,

    #[arg(long)]
    pub hours: Option<u32>,

    #[arg(long)]
    pub caught: Option<u32>,

    /// Dex completion percentage
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub dex: Option<u8>,

    #[arg(long)]
    pub badges: Option<u8>,
}

#[derive(Subcommand)]
pub(crate) enum DexAction {
    /// List caught Pokémon for a game
    List {
        /// Catalog game id
        #[arg(short, long)]
        game: i64,
    },

    /// Record a caught Pokémon
    Record {
        /// Catalog game id
        #[arg(short, long)]
        game: i64,

        /// National dex number
        number: u32,

        /// Name (defaults to the roster name for the number)
        #[arg(long)]
        name: Option<String>,

        /// Game id the Pokémon originally came from (defaults to --game)
        #[arg(long)]
        origin: Option<i64>,
    },

    /// Delete all caught Pokémon for a game
    Delete {
        /// Catalog game id
        #[arg(short, long)]
        game: i64,
    },

    /// Show caught Pokémon grouped by origin game
    Stats,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each value came from
    Show,

    /// Set a value in settings.toml
    Set { key: String, value: String },

    /// Remove a value from settings.toml
    Unset { key: String },

    /// Print the settings file path
    Path,
}
