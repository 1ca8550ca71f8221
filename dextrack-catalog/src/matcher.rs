//! Map a free-text game estimate to a concrete catalog game.
//!
//! Three passes, first hit wins:
//!
//! 1. Keyword table: a known title fragment in the label selects the first
//!    catalog game whose name contains the canonical title.
//! 2. Token overlap among games whose platform suits the detected format.
//! 3. For GBA saves only, the first Game Boy Advance game in the catalog.
//!
//! When nothing matches the result is `None`. Callers must not substitute an
//! arbitrary game.

use dextrack_core::{DetectedFormat, FormatFamily};
use serde::Serialize;

use crate::types::Game;

/// Ordered keyword → canonical title table.
const GAME_KEYWORDS: &[(&str, &str)] = &[
    ("emerald", "Emerald"),
    ("ruby", "Ruby"),
    ("sapphire", "Sapphire"),
    ("firered", "FireRed"),
    ("fire red", "FireRed"),
    ("leafgreen", "LeafGreen"),
    ("leaf green", "LeafGreen"),
    ("pokemon red", "Red"),
    ("pokemon blue", "Blue"),
    ("pokemon yellow", "Yellow"),
    ("pokemon gold", "Gold"),
    ("pokemon silver", "Silver"),
    ("pokemon crystal", "Crystal"),
    ("diamond", "Diamond"),
    ("pearl", "Pearl"),
    ("platinum", "Platinum"),
];

/// Platforms accepted for Game Boy family formats (substring match).
const GAME_BOY_PLATFORMS: &[&str] = &["game boy", "game boy color", "game boy advance"];

/// Tokens shorter than this are ignored by the overlap pass.
const MIN_TOKEN_LEN: usize = 3;

/// How a catalog game was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum MatchReason {
    Keyword { keyword: &'static str },
    TokenOverlap,
    PlatformFallback,
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword { keyword } => write!(f, "keyword '{}'", keyword),
            Self::TokenOverlap => write!(f, "name overlap"),
            Self::PlatformFallback => write!(f, "platform fallback"),
        }
    }
}

/// A successful match.
#[derive(Debug, Clone, Copy)]
pub struct GameMatch<'a> {
    pub game: &'a Game,
    pub reason: MatchReason,
}

/// Lowercase, fold accented Latin letters and collapse whitespace.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
}

/// Whether a catalog platform string suits a detected format family.
///
/// Unknown formats accept every platform.
pub fn platform_compatible(family: FormatFamily, platform: &str) -> bool {
    let platform = platform.to_lowercase();
    match family {
        FormatFamily::GameBoy => GAME_BOY_PLATFORMS.iter().any(|p| platform.contains(p)),
        FormatFamily::Ds => platform.contains("ds"),
        FormatFamily::Unknown => true,
    }
}

/// Matches extraction labels against a slice of catalog games.
pub struct CatalogMatcher<'a> {
    games: &'a [Game],
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(games: &'a [Game]) -> Self {
        Self { games }
    }

    /// Find the catalog game for an estimated label and detected format.
    pub fn find(&self, label: &str, format: DetectedFormat) -> Option<&'a Game> {
        self.find_with_reason(label, format).map(|m| m.game)
    }

    /// Like [`find`](Self::find), but also reports which pass matched.
    pub fn find_with_reason(&self, label: &str, format: DetectedFormat) -> Option<GameMatch<'a>> {
        let estimated = normalize(label);

        if let Some(m) = self.keyword_pass(&estimated) {
            return Some(m);
        }
        if let Some(game) = self.overlap_pass(&estimated, format.family()) {
            return Some(GameMatch {
                game,
                reason: MatchReason::TokenOverlap,
            });
        }
        if format == DetectedFormat::GameBoyAdvance128K {
            let fallback = self
                .games
                .iter()
                .find(|g| g.platform.to_lowercase().contains("game boy advance"));
            if let Some(game) = fallback {
                return Some(GameMatch {
                    game,
                    reason: MatchReason::PlatformFallback,
                });
            }
        }

        log::debug!("No catalog game matches '{}' ({})", label, format);
        None
    }

    fn keyword_pass(&self, estimated: &str) -> Option<GameMatch<'a>> {
        for &(keyword, title) in GAME_KEYWORDS {
            if !estimated.contains(keyword) {
                continue;
            }
            let title = title.to_lowercase();
            if let Some(game) = self.games.iter().find(|g| normalize(&g.name).contains(&title)) {
                return Some(GameMatch {
                    game,
                    reason: MatchReason::Keyword { keyword },
                });
            }
        }
        None
    }

    fn overlap_pass(&self, estimated: &str, family: FormatFamily) -> Option<&'a Game> {
        let estimated_tokens: Vec<&str> = tokens(estimated).collect();
        self.games.iter().find(|game| {
            if !platform_compatible(family, &game.platform) {
                return false;
            }
            let name = normalize(&game.name);
            tokens(&name).any(|gt| {
                estimated_tokens
                    .iter()
                    .any(|et| gt.contains(et) || et.contains(gt))
            })
        })
    }
}

/// Whether an extraction label plausibly describes the named game.
///
/// Used by the strict matching policy. Labels and names are split on
/// whitespace and `/`; the generic series word and the "(complete)" marker
/// are ignored. An empty label token set is treated as a match.
pub fn label_matches_game(label: &str, game_name: &str) -> bool {
    const IGNORED: &[&str] = &["pokemon", "(complete)", "version"];

    let split = |s: &str| -> Vec<String> {
        normalize(s)
            .split(|c: char| c.is_whitespace() || c == '/')
            .filter(|t| t.chars().count() >= MIN_TOKEN_LEN && !IGNORED.contains(t))
            .map(str::to_string)
            .collect()
    };

    let label_tokens = split(label);
    if label_tokens.is_empty() {
        return true;
    }
    let name_tokens = split(game_name);
    label_tokens.iter().any(|lt| name_tokens.contains(lt))
}
