//! First-generation (Red/Blue/Yellow) save extractor.
//!
//! Game Boy saves are 8 KB of battery-backed SRAM. Badge flags live in a
//! single byte near 0x2600 and the owned-species flags occupy a 19-byte
//! bitfield (151 species, one bit each). The exact offsets drift between
//! revisions, so several candidates are probed.
//!
//! Every candidate offset lies past the end of an 8 KB image, so a
//! standard-length save always comes back zeroed. Values are only recovered
//! from longer images that the classifier still assigns here by nearest
//! size, roughly 8602 to 20480 bytes long.

use dextrack_core::util::{percent_of, probe_badges, probe_dex, probe_playtime_u8};
use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GenerationExtractor, ProbeTrace,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Badge byte candidates, in probe order.
const BADGE_OFFSETS: &[usize] = &[0x2625, 0x25F8, 0x260D];

/// Owned-species bitfield candidates.
const DEX_OFFSETS: &[usize] = &[0x25B6, 0x25B5, 0x2605];

/// 151 species / 8 bits, rounded up.
const DEX_RUN: usize = 19;

const SPECIES_TOTAL: u32 = 151;

const BADGE_CAP: u8 = 8;

/// Hours byte of the hours/minutes/seconds playtime triple.
const PLAYTIME_OFFSET: usize = 0x2CED;

/// The playtime triple is only trusted when the buffer extends past it.
const PLAYTIME_MIN_LEN: usize = 0x2CF0;

const LABEL: &str = "Pokemon Red/Blue/Yellow";
const LABEL_COMPLETE: &str = "Pokemon Red/Blue/Yellow (Complete)";
const FALLBACK_LABEL: &str = "Pokemon (Gen 1)";

/// Extractor for first-generation Game Boy saves.
#[derive(Debug, Default)]
pub struct Gen1Extractor;

impl Gen1Extractor {
    pub fn new() -> Self {
        Self
    }
}

impl GenerationExtractor for Gen1Extractor {
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

        let playtime = if data.len() > PLAYTIME_MIN_LEN {
            probe_playtime_u8(data, PLAYTIME_OFFSET, trace)
        } else {
            None
        };
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
        DetectedFormat::GameBoy8K
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
#[path = "tests/gen1_tests.rs"]
mod tests;
