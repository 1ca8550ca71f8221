//! Nintendo DS save extractor.
//!
//! Shared by the fourth and fifth generations (Diamond/Pearl/Platinum and
//! Black/White). Saves are 512 KB; the dex bitfield sits in the upper half
//! of the image, well past the 0x400 playtime counter.

use dextrack_core::util::{percent_of, probe_badges, probe_dex, probe_playtime_u16_le};
use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GenerationExtractor, ProbeTrace,
};

const BADGE_OFFSETS: &[usize] = &[0x15, 0x16, 0x100, 0x200];
const DEX_OFFSETS: &[usize] = &[0x21D00, 0x20000, 0x21000];
const DEX_RUN: usize = 68;
const SPECIES_TOTAL: u32 = 493;
const BADGE_CAP: u8 = 8;
const PLAYTIME_OFFSET: usize = 0x400;

const LABEL: &str = "Pokemon Diamond/Pearl/Platinum/Black/White";
const FALLBACK_LABEL: &str = "Pokemon (DS)";

/// Extractor for Nintendo DS saves.
#[derive(Debug, Default)]
pub struct DsExtractor;

impl DsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl GenerationExtractor for DsExtractor {
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

        let result = ExtractionResult::empty(LABEL, self.format())
            .with_badges(badges.min(BADGE_CAP))
            .with_dex_percent(percent_of(owned, SPECIES_TOTAL))
            .with_playtime(playtime.unwrap_or(0));
        BestEffort::degraded(result, degradations)
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::NintendoDs512K
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
#[path = "tests/ds_tests.rs"]
mod tests;
