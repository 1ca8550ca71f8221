use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hardware generation a save file was produced by, as guessed from its size.
///
/// This enum centralizes format identity (canonical size, labels and
/// aliases) so the classifier, the extractors and the catalog matcher all
/// agree on the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedFormat {
    GameBoy8K,
    GameBoyColor32K,
    GameBoyAdvance128K,
    NintendoDs512K,
    Unknown,
}

/// Broad hardware family, used when filtering catalog entries by platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatFamily {
    GameBoy,
    Ds,
    Unknown,
}

/// The four classifiable formats in ascending canonical size.
const CLASSIFIABLE: &[DetectedFormat] = &[
    DetectedFormat::GameBoy8K,
    DetectedFormat::GameBoyColor32K,
    DetectedFormat::GameBoyAdvance128K,
    DetectedFormat::NintendoDs512K,
];

const ALL_FORMATS: &[DetectedFormat] = &[
    DetectedFormat::GameBoy8K,
    DetectedFormat::GameBoyColor32K,
    DetectedFormat::GameBoyAdvance128K,
    DetectedFormat::NintendoDs512K,
    DetectedFormat::Unknown,
];

impl DetectedFormat {
    /// Canonical save size in bytes, or `None` for `Unknown`.
    pub fn canonical_size(&self) -> Option<usize> {
        match self {
            Self::GameBoy8K => Some(8 * 1024),
            Self::GameBoyColor32K => Some(32 * 1024),
            Self::GameBoyAdvance128K => Some(128 * 1024),
            Self::NintendoDs512K => Some(512 * 1024),
            Self::Unknown => None,
        }
    }

    /// Short name used for CLI arguments and JSON output.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::GameBoy8K => "gb",
            Self::GameBoyColor32K => "gbc",
            Self::GameBoyAdvance128K => "gba",
            Self::NintendoDs512K => "nds",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label, e.g. "Game Boy Advance (128KB)".
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GameBoy8K => "Game Boy (8KB)",
            Self::GameBoyColor32K => "Game Boy Color (32KB)",
            Self::GameBoyAdvance128K => "Game Boy Advance (128KB)",
            Self::NintendoDs512K => "Nintendo DS (512KB)",
            Self::Unknown => "Unknown",
        }
    }

    /// All accepted names for this format (case-insensitive matching).
    ///
    /// The short name comes first, followed by the display label and common
    /// alternatives.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::GameBoy8K => &["gb", "game boy (8kb)", "gameboy", "game boy", "gen1"],
            Self::GameBoyColor32K => &[
                "gbc",
                "game boy color (32kb)",
                "game boy color",
                "gameboy color",
                "gen2",
            ],
            Self::GameBoyAdvance128K => &[
                "gba",
                "game boy advance (128kb)",
                "game boy advance",
                "gameboy advance",
                "gen3",
            ],
            Self::NintendoDs512K => &["nds", "nintendo ds (512kb)", "nintendo ds", "ds", "gen4"],
            Self::Unknown => &["unknown"],
        }
    }

    pub fn family(&self) -> FormatFamily {
        match self {
            Self::GameBoy8K | Self::GameBoyColor32K | Self::GameBoyAdvance128K => {
                FormatFamily::GameBoy
            }
            Self::NintendoDs512K => FormatFamily::Ds,
            Self::Unknown => FormatFamily::Unknown,
        }
    }

    /// The four formats the classifier can produce, smallest first.
    pub fn classifiable() -> &'static [DetectedFormat] {
        CLASSIFIABLE
    }

    /// All five variants, including `Unknown`.
    pub fn all() -> &'static [DetectedFormat] {
        ALL_FORMATS
    }
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `DetectedFormat`.
#[derive(Debug, Clone, Error)]
#[error("unknown save format: '{0}'")]
pub struct FormatParseError(pub String);

impl std::str::FromStr for DetectedFormat {
    type Err = FormatParseError;

    /// Parse a format from its short name, display label or any alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for &format in ALL_FORMATS {
            if format.short_name() == lower || format.aliases().contains(&lower.as_str()) {
                return Ok(format);
            }
        }
        Err(FormatParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
