//! Data model types for games, checklists and per-user progress.
//!
//! These types carry no database dependency. `dextrack-db` persists them and
//! the YAML seed files deserialize into the `Catalog*` variants.

use serde::{Deserialize, Serialize};

// ── Games ───────────────────────────────────────────────────────────────────

/// A game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    /// Display platform, e.g. "Game Boy Advance".
    pub platform: String,
    #[serde(default)]
    pub generation: Option<u32>,
    #[serde(default)]
    pub release_year: Option<u32>,
    /// Typical hours to finish the main story.
    #[serde(default)]
    pub completion_time_hours: Option<f64>,
}

/// One checklist entry for a game (a gym, the dex, a legendary...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub content_type: ContentType,
    pub order_num: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Kind of checklist entry.
///
/// Unrecognized kinds are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Gym,
    PokemonCatch,
    EliteFour,
    Champion,
    Legendary,
    Story,
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gym => "gym",
            Self::PokemonCatch => "pokemon_catch",
            Self::EliteFour => "elite_four",
            Self::Champion => "champion",
            Self::Legendary => "legendary",
            Self::Story => "story",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        let known = match s.as_str() {
            "gym" => Some(Self::Gym),
            "pokemon_catch" => Some(Self::PokemonCatch),
            "elite_four" => Some(Self::EliteFour),
            "champion" => Some(Self::Champion),
            "legendary" => Some(Self::Legendary),
            "story" => Some(Self::Story),
            _ => None,
        };
        known.unwrap_or(Self::Other(s))
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ContentType> for String {
    fn from(t: ContentType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── YAML seed format ────────────────────────────────────────────────────────

/// A game definition with its checklist, loaded from `catalog/games/*.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogGame {
    pub id: i64,
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub generation: Option<u32>,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub completion_time_hours: Option<f64>,
    #[serde(default)]
    pub content: Vec<CatalogContent>,
}

/// A checklist entry in a game YAML file.
///
/// `order` defaults to the entry's 1-based position in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogContent {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogGame {
    pub fn to_game(&self) -> Game {
        Game {
            id: self.id,
            name: self.name.clone(),
            platform: self.platform.clone(),
            generation: self.generation,
            release_year: self.release_year,
            completion_time_hours: self.completion_time_hours,
        }
    }
}

// ── Progress ────────────────────────────────────────────────────────────────

/// Play status of a game for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    pub fn all() -> &'static [ProgressStatus] {
        &[
            Self::NotStarted,
            Self::InProgress,
            Self::Completed,
            Self::Paused,
        ]
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == norm)
            .ok_or_else(|| format!("unknown status: '{}'", s))
    }
}

/// Per (user, game) progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: String,
    pub game_id: i64,
    pub status: ProgressStatus,
    pub save_file_imported: bool,
    pub save_file_name: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Completion state of one checklist entry for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub id: i64,
    pub user_id: String,
    pub game_id: i64,
    pub content_id: i64,
    pub is_completed: bool,
    pub completed_at: Option<String>,
    pub updated_at: String,
}

// ── Creatures ───────────────────────────────────────────────────────────────

/// A creature a user has caught in a game, with where it originally came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtCreature {
    pub user_id: String,
    pub game_id: i64,
    /// National dex number.
    pub creature_id: u32,
    pub creature_name: String,
    pub origin_game_id: Option<i64>,
    pub origin_game_name: Option<String>,
    pub caught_at: String,
}

/// Creatures grouped by the game they originated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginGameStats {
    pub origin_game_name: Option<String>,
    pub count: u64,
    /// Distinct creature names, sorted.
    pub creatures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTotals {
    pub unique_caught: u64,
    pub total_entries: u64,
    pub games_with_creatures: u64,
    pub origin_games: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    /// Ordered by count, largest first.
    pub by_origin: Vec<OriginGameStats>,
    pub totals: CreatureTotals,
}

/// Per-user summary across all tracked games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_games: u64,
    pub completed_games: u64,
    pub in_progress_games: u64,
    pub paused_games: u64,
    pub not_started_games: u64,
    /// Sum of typical completion hours over completed games, rounded.
    pub total_hours_completed: u64,
}
