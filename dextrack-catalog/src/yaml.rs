//! YAML loading for the human-curated game catalog.
//!
//! Each game and its checklist live in one file under `catalog/games/`.

use crate::types::CatalogGame;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("Duplicate game id {id} ({name})")]
    DuplicateGameId { id: i64, name: String },
}

/// Load all game definitions from YAML files in a directory.
///
/// Each `.yaml` file should contain a single `CatalogGame`. Files are read
/// in file-name order. A missing directory yields an empty list.
pub fn load_games(dir: &Path) -> Result<Vec<CatalogGame>, YamlError> {
    let games: Vec<CatalogGame> = load_yaml_dir(dir)?;

    let mut seen = HashSet::new();
    for game in &games {
        if !seen.insert(game.id) {
            return Err(YamlError::DuplicateGameId {
                id: game.id,
                name: game.name.clone(),
            });
        }
    }
    Ok(games)
}

/// Load the catalog from the standard directory layout.
///
/// Expected structure:
/// ```text
/// catalog_dir/
///   games/
///     01-red.yaml
///     02-blue.yaml
///     ...
/// ```
pub fn load_catalog(catalog_dir: &Path) -> Result<Vec<CatalogGame>, YamlError> {
    load_games(&catalog_dir.join("games"))
}

/// Generic helper: load all YAML files in a directory, each containing a single `T`.
fn load_yaml_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut items = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let item: T = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        items.push(item);
    }

    Ok(items)
}
