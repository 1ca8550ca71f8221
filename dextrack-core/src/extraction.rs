use serde::{Deserialize, Serialize};

use crate::format::DetectedFormat;

/// Normalized numbers recovered from one save file.
///
/// Every numeric field is already clamped to the maxima of the generation
/// that produced it. A value of zero means either "genuinely zero" or "could
/// not be recovered"; the surrounding [`BestEffort`] says which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Free-text guess at the title, e.g. "Pokemon Emerald/Ruby/Sapphire".
    pub estimated_game_label: String,
    pub badges: u8,
    /// Percentage of the species roster marked owned, 0 to 100.
    pub dex_completion_percent: u8,
    pub playtime_hours: u16,
    pub format: DetectedFormat,
}

impl ExtractionResult {
    /// All-zero result carrying only a label and format.
    pub fn empty(label: impl Into<String>, format: DetectedFormat) -> Self {
        Self {
            estimated_game_label: label.into(),
            badges: 0,
            dex_completion_percent: 0,
            playtime_hours: 0,
            format,
        }
    }

    pub fn with_badges(mut self, badges: u8) -> Self {
        self.badges = badges;
        self
    }

    pub fn with_dex_percent(mut self, percent: u8) -> Self {
        self.dex_completion_percent = percent.min(100);
        self
    }

    pub fn with_playtime(mut self, hours: u16) -> Self {
        self.playtime_hours = hours;
        self
    }
}

/// Something that went less than perfectly during a best-effort operation.
///
/// Degradations are informational. The value they accompany is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// The blob length fit no tolerance band; the nearest canonical size was used.
    ClassifiedByNearestSize { len: usize, chosen: DetectedFormat },
    /// No badge candidate offset produced a plausible count.
    BadgesNotFound,
    /// No dex candidate run produced a plausible count.
    DexNotFound,
    /// The playtime field lies beyond the end of the buffer.
    PlaytimeOutOfBounds { offset: usize },
    /// No extractor is registered for the classified format.
    NoExtractor { format: DetectedFormat },
    /// The extractor panicked and its fallback result was used instead.
    ExtractorPanicked {
        format: DetectedFormat,
        message: String,
    },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassifiedByNearestSize { len, chosen } => write!(
                f,
                "{} bytes matched no known size, treated as {}",
                len, chosen
            ),
            Self::BadgesNotFound => write!(f, "no badge bitfield found"),
            Self::DexNotFound => write!(f, "no dex bitfield found"),
            Self::PlaytimeOutOfBounds { offset } => {
                write!(f, "playtime offset 0x{:X} is out of bounds", offset)
            }
            Self::NoExtractor { format } => write!(f, "no extractor registered for {}", format),
            Self::ExtractorPanicked { format, message } => {
                write!(f, "{} extractor failed ({}), using fallback", format, message)
            }
        }
    }
}

/// A value that is always present, plus the degradations met producing it.
///
/// There is no failure variant. Callers get a usable payload every time and
/// may inspect `degradations` to see which parts fell back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestEffort<T> {
    pub value: T,
    pub degradations: Vec<Degradation>,
}

impl<T> BestEffort<T> {
    /// A value obtained without any degradation.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            degradations: Vec::new(),
        }
    }

    pub fn degraded(value: T, degradations: Vec<Degradation>) -> Self {
        Self {
            value,
            degradations,
        }
    }
}
