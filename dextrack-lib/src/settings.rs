//! Application settings (database path, catalog location, matching policy).
//!
//! The settings file is always `<config dir>/dextrack/settings.toml`. Each
//! value is resolved through the same priority chain:
//!
//! 1. Command-line override
//! 2. Environment variable
//! 3. `settings.toml`
//! 4. Built-in default

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const ENV_DATABASE_PATH: &str = "DEXTRACK_DB";
pub const ENV_CATALOG_DIR: &str = "DEXTRACK_CATALOG_DIR";
pub const ENV_GAME_MATCH: &str = "DEXTRACK_GAME_MATCH";
pub const ENV_MAX_UPLOAD_BYTES: &str = "DEXTRACK_MAX_UPLOAD_BYTES";

/// Uploads larger than this are refused by the host.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Keys accepted by `settings.toml` and `config set`.
pub const SETTING_KEYS: &[&str] = &[
    "database_path",
    "catalog_dir",
    "game_match_policy",
    "max_upload_bytes",
];

/// How a save whose detected game disagrees with the selected game is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMatchPolicy {
    /// Mismatches are reported as a warning and the upload proceeds.
    #[default]
    Advisory,
    /// Mismatches reject the upload.
    Strict,
}

impl GameMatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for GameMatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GameMatchPolicy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "strict" => Ok(Self::Strict),
            _ => Err(SettingsError::invalid(
                "game_match_policy",
                s,
                "expected 'advisory' or 'strict'",
            )),
        }
    }
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    EnvVar(&'static str),
    ConfigFile,
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// On-disk format of `settings.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    pub database_path: Option<PathBuf>,
    pub catalog_dir: Option<PathBuf>,
    pub game_match_policy: Option<GameMatchPolicy>,
    pub max_upload_bytes: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingOverrides {
    pub database_path: Option<PathBuf>,
    pub catalog_dir: Option<PathBuf>,
    pub game_match_policy: Option<GameMatchPolicy>,
    pub max_upload_bytes: Option<u64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub database_path: PathBuf,
    pub catalog_dir: PathBuf,
    pub game_match_policy: GameMatchPolicy,
    pub max_upload_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            catalog_dir: default_catalog_dir(),
            game_match_policy: GameMatchPolicy::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Provenance of each resolved setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSources {
    pub database_path: SettingSource,
    pub catalog_dir: SettingSource,
    pub game_match_policy: SettingSource,
    pub max_upload_bytes: SettingSource,
}

/// Canonical path to the settings file: `~/.config/dextrack/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("dextrack").join("settings.toml")
}

/// Default SQLite database location under the user data directory.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("dextrack").join("dextrack.db")
}

/// Default catalog directory, relative to the working directory.
pub fn default_catalog_dir() -> PathBuf {
    PathBuf::from("catalog")
}

/// Read a settings file. A missing file yields empty settings.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(e) => return Err(SettingsError::io(path, e)),
    };
    toml::from_str(&contents).map_err(|e| SettingsError::parse(path, e))
}

impl Settings {
    /// Resolve settings from the real environment and settings file.
    pub fn load(overrides: &SettingOverrides) -> Result<(Self, SettingSources), SettingsError> {
        let file = load_settings_file(&settings_path())?;
        Self::resolve(overrides, &file, |key| std::env::var(key).ok())
    }

    /// Resolve settings from explicit inputs.
    ///
    /// `env` looks up an environment variable by name; tests pass a closure
    /// over a fixed map instead of touching the process environment.
    pub fn resolve(
        overrides: &SettingOverrides,
        file: &SettingsFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, SettingSources), SettingsError> {
        let (database_path, database_path_src) = pick(
            overrides.database_path.clone(),
            ENV_DATABASE_PATH,
            &env,
            |s| Ok(PathBuf::from(s)),
            file.database_path.clone(),
            default_database_path,
        )?;
        let (catalog_dir, catalog_dir_src) = pick(
            overrides.catalog_dir.clone(),
            ENV_CATALOG_DIR,
            &env,
            |s| Ok(PathBuf::from(s)),
            file.catalog_dir.clone(),
            default_catalog_dir,
        )?;
        let (game_match_policy, policy_src) = pick(
            overrides.game_match_policy,
            ENV_GAME_MATCH,
            &env,
            |s| s.parse(),
            file.game_match_policy,
            GameMatchPolicy::default,
        )?;
        let (max_upload_bytes, max_upload_src) = pick(
            overrides.max_upload_bytes,
            ENV_MAX_UPLOAD_BYTES,
            &env,
            parse_byte_count,
            file.max_upload_bytes,
            || DEFAULT_MAX_UPLOAD_BYTES,
        )?;

        Ok((
            Self {
                database_path,
                catalog_dir,
                game_match_policy,
                max_upload_bytes,
            },
            SettingSources {
                database_path: database_path_src,
                catalog_dir: catalog_dir_src,
                game_match_policy: policy_src,
                max_upload_bytes: max_upload_src,
            },
        ))
    }
}

fn pick<T>(
    cli: Option<T>,
    env_key: &'static str,
    env: &impl Fn(&str) -> Option<String>,
    parse: impl Fn(&str) -> Result<T, SettingsError>,
    file: Option<T>,
    default: impl FnOnce() -> T,
) -> Result<(T, SettingSource), SettingsError> {
    if let Some(v) = cli {
        return Ok((v, SettingSource::CommandLine));
    }
    if let Some(raw) = env(env_key).filter(|s| !s.is_empty()) {
        return Ok((parse(&raw)?, SettingSource::EnvVar(env_key)));
    }
    if let Some(v) = file {
        return Ok((v, SettingSource::ConfigFile));
    }
    Ok((default(), SettingSource::Default))
}

fn parse_byte_count(s: &str) -> Result<u64, SettingsError> {
    match s.trim().parse::<u64>() {
        Ok(0) => Err(SettingsError::invalid("max_upload_bytes", s, "must be positive")),
        Ok(n) => Ok(n),
        Err(e) => Err(SettingsError::invalid("max_upload_bytes", s, e.to_string())),
    }
}

/// Set one key in the settings file at `path`, preserving everything else.
///
/// The value is validated against the key's type before writing. Uses
/// `toml::Value` for a surgical update and writes atomically.
pub fn save_setting_at(path: &Path, key: &str, value: &str) -> Result<(), SettingsError> {
    let new_value = match key {
        "database_path" | "catalog_dir" => toml::Value::String(value.to_string()),
        "game_match_policy" => {
            let policy: GameMatchPolicy = value.parse()?;
            toml::Value::String(policy.as_str().to_string())
        }
        "max_upload_bytes" => {
            let n = parse_byte_count(value)?;
            let n = i64::try_from(n)
                .map_err(|_| SettingsError::invalid(key, value, "too large"))?;
            toml::Value::Integer(n)
        }
        _ => return Err(SettingsError::UnknownKey(key.to_string())),
    };
    update_settings_at(path, |table| {
        table.insert(key.to_string(), new_value);
    })
}

/// Remove one key from the settings file at `path`.
pub fn unset_setting_at(path: &Path, key: &str) -> Result<(), SettingsError> {
    if !SETTING_KEYS.contains(&key) {
        return Err(SettingsError::UnknownKey(key.to_string()));
    }
    update_settings_at(path, |table| {
        table.remove(key);
    })
}

/// Set one key in the canonical settings file.
pub fn save_setting(key: &str, value: &str) -> Result<(), SettingsError> {
    save_setting_at(&settings_path(), key, value)
}

/// Remove one key from the canonical settings file.
pub fn unset_setting(key: &str) -> Result<(), SettingsError> {
    unset_setting_at(&settings_path(), key)
}

fn update_settings_at(
    path: &Path,
    edit: impl FnOnce(&mut toml::map::Map<String, toml::Value>),
) -> Result<(), SettingsError> {
    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .parse()
            .map_err(|e| SettingsError::parse(path, e))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(e) => return Err(SettingsError::io(path, e)),
    };

    let table = doc.as_table_mut().ok_or_else(|| {
        SettingsError::invalid("settings.toml", path.display().to_string(), "root is not a table")
    })?;
    edit(table);

    // Write atomically
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
    }
    let serialized = toml::to_string_pretty(&doc)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized).map_err(|e| SettingsError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| SettingsError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
