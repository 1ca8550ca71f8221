//! Save upload for a user-selected game.
//!
//! The user's choice of game is authoritative. Detection only produces a
//! warning unless the strict matching policy is configured.

use dextrack_catalog::label_matches_game;
use dextrack_catalog::types::*;
use dextrack_db::operations::{self, OperationError};
use dextrack_db::queries;
use dextrack_lib::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GameMatchPolicy, SaveFileParser,
    Settings,
};
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;

use crate::autopopulate::{PopulateError, PopulateRequest, PopulateStats, auto_populate};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No save file supplied")]
    NoFile,
    #[error("Game not found: {0}")]
    GameNotFound(i64),
    #[error("Save looks like '{detected}', which does not match {game}")]
    DetectionMismatch { detected: String, game: String },
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Auto-population failed: {0}")]
    Populate(#[from] PopulateError),
}

/// An uploaded save blob. Contents are untrusted.
#[derive(Debug, Clone)]
pub struct SaveUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SaveUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a save from disk, using its file name as the upload name.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }
}

/// Numbers reported back to the caller about what was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoPopulated {
    pub gyms_completed: usize,
    pub dex_progress: u8,
}

/// Everything an upload produced.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub file_name: String,
    pub format: DetectedFormat,
    pub extraction: ExtractionResult,
    pub degradations: Vec<Degradation>,
    pub target_game: Game,
    /// The extractor's free-text guess.
    pub detected_game: String,
    pub game_matches: bool,
    pub validation_warning: Option<String>,
    pub progress: ProgressRecord,
    pub auto_populated: AutoPopulated,
    pub stats: PopulateStats,
    /// RFC 3339 time the save was analyzed.
    pub analyzed_at: String,
}

/// Parse a save and apply it to (user, game) with the standard extractors.
pub fn upload_save(
    conn: &Connection,
    settings: &Settings,
    user_id: &str,
    game_id: i64,
    upload: Option<SaveUpload>,
) -> Result<UploadOutcome, UploadError> {
    upload_save_with(
        conn,
        &SaveFileParser::standard(),
        settings.game_match_policy,
        user_id,
        game_id,
        upload,
    )
}

/// Like [`upload_save`], with an explicit parser and matching policy.
pub fn upload_save_with(
    conn: &Connection,
    parser: &SaveFileParser,
    policy: GameMatchPolicy,
    user_id: &str,
    game_id: i64,
    upload: Option<SaveUpload>,
) -> Result<UploadOutcome, UploadError> {
    let upload = upload.ok_or(UploadError::NoFile)?;
    let game = queries::get_game(conn, game_id)?.ok_or(UploadError::GameNotFound(game_id))?;

    let parsed = parser.parse(&upload.bytes);
    apply_parsed(conn, policy, user_id, game, &upload.file_name, parsed)
}

/// Apply an already parsed save to a known game.
pub(crate) fn apply_parsed(
    conn: &Connection,
    policy: GameMatchPolicy,
    user_id: &str,
    game: Game,
    file_name: &str,
    parsed: BestEffort<ExtractionResult>,
) -> Result<UploadOutcome, UploadError> {
    let analyzed_at = chrono::Utc::now().to_rfc3339();
    let BestEffort {
        value: extraction,
        degradations,
    } = parsed;

    for d in &degradations {
        log::debug!("{}: {}", file_name, d);
    }

    let game_matches = label_matches_game(&extraction.estimated_game_label, &game.name);
    let validation_warning = if game_matches {
        None
    } else {
        match policy {
            GameMatchPolicy::Strict => {
                return Err(UploadError::DetectionMismatch {
                    detected: extraction.estimated_game_label,
                    game: game.name,
                });
            }
            GameMatchPolicy::Advisory => {
                log::warn!(
                    "{}: detected '{}' but importing into {}",
                    file_name,
                    extraction.estimated_game_label,
                    game.name
                );
                Some("Warning: Detected game may not match the selected game".to_string())
            }
        }
    };

    let populated = auto_populate(
        conn,
        &PopulateRequest {
            user_id,
            game: &game,
            file_name: Some(file_name),
            extraction: &extraction,
        },
    )?;

    Ok(UploadOutcome {
        file_name: file_name.to_string(),
        format: extraction.format,
        detected_game: extraction.estimated_game_label.clone(),
        auto_populated: AutoPopulated {
            gyms_completed: populated.stats.gyms_completed,
            dex_progress: extraction.dex_completion_percent,
        },
        extraction,
        degradations,
        target_game: game,
        game_matches,
        validation_warning,
        progress: populated.progress,
        stats: populated.stats,
        analyzed_at,
    })
}

// ── Manual stats ────────────────────────────────────────────────────────────

/// Numbers a user typed in instead of uploading a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManualStats {
    pub hours_played: Option<u32>,
    pub creatures_caught: Option<u32>,
    pub dex_completion_percent: Option<u8>,
    pub badges: Option<u8>,
}

/// Result of [`record_manual_stats`]: the progress record and the echoed stats.
#[derive(Debug, Clone, Serialize)]
pub struct ManualStatsOutcome {
    pub progress: ProgressRecord,
    pub stats: ManualStats,
}

/// Mark (user, game) as save-imported without a file.
///
/// Creates an `in_progress` record when none exists. The numbers are echoed
/// back but not written anywhere else.
pub fn record_manual_stats(
    conn: &Connection,
    user_id: &str,
    game_id: i64,
    stats: ManualStats,
) -> Result<ManualStatsOutcome, UploadError> {
    if queries::get_game(conn, game_id)?.is_none() {
        return Err(UploadError::GameNotFound(game_id));
    }
    let progress = operations::mark_save_imported(conn, user_id, game_id, None)?;
    Ok(ManualStatsOutcome { progress, stats })
}
