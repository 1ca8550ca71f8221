//! Second-generation (Gold/Silver/Crystal) save extractor.
//!
//! Game Boy Color saves are 32 KB. Johto and Kanto badges are stored as two
//! separate bytes, so the cap is 16 even though each probe reads one byte.

use dextrack_core::util::{percent_of, probe_badges, probe_dex, probe_playtime_u8};
use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GenerationExtractor, ProbeTrace,
};

const BADGE_OFFSETS: &[usize] = &[0x26, 0x2626, 0x3025, 0x22, 0x25];
const DEX_OFFSETS: &[usize] = &[0x3C06, 0x3C00, 0x38];

/// Bytes summed per candidate window.
const DEX_RUN: usize = 25;

const SPECIES_TOTAL: u32 = 251;
const BADGE_CAP: u8 = 16;
const PLAYTIME_OFFSET: usize = 0x2CED;

const LABEL: &str = "Pokemon Gold/Silver/Crystal";
const LABEL_COMPLETE: &str = "Pokemon Gold/Silver/Crystal (Complete)";
const FALLBACK_LABEL: &str = "Pokemon (Gen 2)";

/// Extractor for second-generation Game Boy Color saves.
#[derive(Debug, Default)]
pub struct Gen2Extractor;

impl Gen2Extractor {
    pub fn new() -> Self {
        Self
    }
}

impl GenerationExtractor for Gen2Extractor {
    fn extract(&self, data: &[u8], trace: &dyn ProbeTrace) -> BestEffort<ExtractionResult> {
        let mut degradations = Vec::new();

        let badges = probe_badges(data, BADGE_OFFSETS, BADGE_CAP, trace);
        if badges == 0 {
            degradations.push(Degradation::BadgesNotFound);
        }

        let owned = probe_dex(data, DEX_OFFSETS, DEX_RUN, SPECIES_TOTAL, trace);
        if owned == 0 {
            degradations.push(Degradation::DexNotFound);
        }

        let playtime = probe_playtime_u8(data, PLAYTIME_OFFSET, trace);
        if playtime.is_none() {
            degradations.push(Degradation::PlaytimeOutOfBounds {
                offset: PLAYTIME_OFFSET,
            });
        }

        let label = if badges >= BADGE_CAP {
            LABEL_COMPLETE
        } else {
            LABEL
        };

        let result = ExtractionResult::empty(label, self.format())
            .with_badges(badges.min(BADGE_CAP))
            .with_dex_percent(percent_of(owned, SPECIES_TOTAL))
            .with_playtime(playtime.unwrap_or(0));
        BestEffort::degraded(result, degradations)
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::GameBoyColor32K
    }

    fn fallback(&self) -> ExtractionResult {
        ExtractionResult::empty(FALLBACK_LABEL, self.format())
    }

    fn badge_cap(&self) -> u8 {
        BADGE_CAP
    }

    fn species_total(&self) -> u32 {
        SPECIES_TOTAL
    }
}

#[cfg(test)]
#[path = "tests/gen2_tests.rs"]
mod tests;
