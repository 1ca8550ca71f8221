//! Import a batch of save files, choosing each file's game automatically.
//!
//! Files are processed one after another. Every file gets its own
//! [`BulkOutcome`]; a failing file never stops the batch.

use std::path::{Path, PathBuf};

use dextrack_catalog::CatalogMatcher;
use dextrack_db::operations::OperationError;
use dextrack_db::queries;
use dextrack_lib::{DetectedFormat, GameMatchPolicy, SaveFileParser};
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

use crate::progress::ImportProgress;
use crate::upload::{UploadOutcome, apply_parsed};

/// File extensions accepted as save files (lowercase, no dot).
pub const SAVE_EXTENSIONS: &[&str] = &["sav", "3ds"];

#[derive(Debug, Error)]
pub enum BulkError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: String,
        source: std::io::Error,
    },
}

/// Options for a bulk import.
#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub user_id: String,
    pub policy: GameMatchPolicy,
    /// Files larger than this are skipped.
    pub max_file_bytes: u64,
}

/// Why a file was not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedExtension,
    TooLarge { size: u64, limit: u64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedExtension => write!(f, "not a .sav or .3ds file"),
            Self::TooLarge { size, limit } => {
                write!(f, "{} bytes exceeds the {} byte limit", size, limit)
            }
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkOutcome {
    Imported {
        file: PathBuf,
        upload: Box<UploadOutcome>,
    },
    /// No catalog game could be matched to the detected label.
    Unmatched {
        file: PathBuf,
        format: DetectedFormat,
        label: String,
    },
    Skipped {
        file: PathBuf,
        reason: SkipReason,
    },
    Failed {
        file: PathBuf,
        error: String,
    },
}

impl BulkOutcome {
    pub fn file(&self) -> &Path {
        match self {
            Self::Imported { file, .. }
            | Self::Unmatched { file, .. }
            | Self::Skipped { file, .. }
            | Self::Failed { file, .. } => file,
        }
    }
}

impl std::fmt::Display for BulkOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = file_label(self.file());
        match self {
            Self::Imported { upload, .. } => write!(
                f,
                "{}: imported for {} ({} badges, {}% dex)",
                name,
                upload.target_game.name,
                upload.extraction.badges,
                upload.extraction.dex_completion_percent
            ),
            Self::Unmatched { format, label, .. } => write!(
                f,
                "{}: could not identify the game (detected {} as {})",
                name, format, label
            ),
            Self::Skipped { reason, .. } => write!(f, "{}: skipped, {}", name, reason),
            Self::Failed { error, .. } => write!(f, "{}: {}", name, error),
        }
    }
}

/// Counts per outcome kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkStats {
    pub imported: usize,
    pub unmatched: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BulkStats {
    fn record(&mut self, outcome: &BulkOutcome) {
        match outcome {
            BulkOutcome::Imported { .. } => self.imported += 1,
            BulkOutcome::Unmatched { .. } => self.unmatched += 1,
            BulkOutcome::Skipped { .. } => self.skipped += 1,
            BulkOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub outcomes: Vec<BulkOutcome>,
    pub stats: BulkStats,
}

/// Whether a path has one of the accepted save extensions (case-insensitive).
pub fn is_save_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SAVE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the regular files of a directory in name order.
///
/// All files are returned; the extension filter is applied by
/// [`bulk_import`] so rejected files show up as skipped.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, BulkError> {
    let read_err = |e: std::io::Error| BulkError::ReadDir {
        path: dir.display().to_string(),
        source: e,
    };
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(read_err)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Import each file into the catalog game its contents suggest.
///
/// Only a failure to read the catalog aborts the batch.
pub fn bulk_import(
    conn: &Connection,
    parser: &SaveFileParser,
    files: &[PathBuf],
    options: &BulkOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<BulkReport, BulkError> {
    let games = queries::list_games(conn)?;
    let matcher = CatalogMatcher::new(&games);

    let mut outcomes = Vec::with_capacity(files.len());
    let mut stats = BulkStats::default();
    let total = files.len();

    for (i, path) in files.iter().enumerate() {
        if let Some(p) = progress {
            p.on_file(i + 1, total, &file_label(path));
        }

        let outcome = import_one(conn, parser, &matcher, path, options);
        stats.record(&outcome);
        if let Some(p) = progress {
            p.on_outcome(&outcome);
        }
        outcomes.push(outcome);
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Bulk import: {} imported, {} unmatched, {} skipped, {} failed",
            stats.imported, stats.unmatched, stats.skipped, stats.failed
        ));
    }

    Ok(BulkReport { outcomes, stats })
}

fn import_one(
    conn: &Connection,
    parser: &SaveFileParser,
    matcher: &CatalogMatcher<'_>,
    path: &Path,
    options: &BulkOptions,
) -> BulkOutcome {
    let file = path.to_path_buf();

    if !is_save_file(path) {
        return BulkOutcome::Skipped {
            file,
            reason: SkipReason::UnsupportedExtension,
        };
    }

    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            return BulkOutcome::Failed {
                file,
                error: e.to_string(),
            };
        }
    };
    if size > options.max_file_bytes {
        return BulkOutcome::Skipped {
            file,
            reason: SkipReason::TooLarge {
                size,
                limit: options.max_file_bytes,
            },
        };
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return BulkOutcome::Failed {
                file,
                error: e.to_string(),
            };
        }
    };

    let parsed = parser.parse(&bytes);
    let format = parsed.value.format;
    let label = parsed.value.estimated_game_label.clone();

    let Some(game) = matcher.find(&label, format) else {
        return BulkOutcome::Unmatched {
            file,
            format,
            label,
        };
    };

    match apply_parsed(
        conn,
        options.policy,
        &options.user_id,
        game.clone(),
        &file_label(path),
        parsed,
    ) {
        Ok(upload) => BulkOutcome::Imported {
            file,
            upload: Box::new(upload),
        },
        Err(e) => BulkOutcome::Failed {
            file,
            error: e.to_string(),
        },
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
