//! Game Boy Advance save extractor.
//!
//! Covers Ruby/Sapphire/Emerald and FireRed/LeafGreen 128 KB flash saves.
//! Real saves are split into rotating, checksummed sections; this extractor
//! does not decode them and instead probes fixed offsets in the raw image.

use dextrack_core::util::{percent_of, probe_badges, probe_dex, probe_playtime_u16_le};
use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GenerationExtractor, ProbeTrace,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const BADGE_OFFSETS: &[usize] = &[0x20, 0x21, 0x29, 0x2A, 0x100, 0x200];
const DEX_OFFSETS: &[usize] = &[0x27A, 0x2A0, 0x300, 0x338, 0x500];
const DEX_RUN: usize = 26;

/// National dex size for the third generation.
const SPECIES_TOTAL: u32 = 386;

const BADGE_CAP: u8 = 8;

/// Little-endian u16 hour counter.
const PLAYTIME_OFFSET: usize = 0x800;

/// Default guess. Upgraded once any badge is found.
const LABEL: &str = "Pokemon Emerald";
const LABEL_WITH_BADGES: &str = "Pokemon Emerald/Ruby/Sapphire";

/// Extractor for Game Boy Advance saves.
#[derive(Debug, Default)]
pub struct GbaExtractor;

impl GbaExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl GenerationExtractor for GbaExtractor {
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

        let playtime = probe_playtime_u16_le(data, PLAYTIME_OFFSET, trace);
        if playtime.is_none() {
            degradations.push(Degradation::PlaytimeOutOfBounds {
                offset: PLAYTIME_OFFSET,
            });
        }

        let label = if badges > 0 { LABEL_WITH_BADGES } else { LABEL };

        let result = ExtractionResult::empty(label, self.format())
            .with_badges(badges.min(BADGE_CAP))
            .with_dex_percent(percent_of(owned, SPECIES_TOTAL))
            .with_playtime(playtime.unwrap_or(0));

        BestEffort::degraded(result, degradations)
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::GameBoyAdvance128K
    }

    fn fallback(&self) -> ExtractionResult {
        ExtractionResult::empty(LABEL, self.format())
    }

    fn badge_cap(&self) -> u8 {
        BADGE_CAP
    }

    fn species_total(&self) -> u32 {
        SPECIES_TOTAL
    }
}

#[cfg(test)]
#[path = "tests/gba_tests.rs"]
mod tests;
