use super::*;
use dextrack_core::{ProbeKind, RecordingTrace, SilentTrace};

/// Build a blank 8 KB first-generation save.
fn make_gen1_save() -> Vec<u8> {
    vec![0u8; 8 * 1024]
}

/// Every badge and dex candidate lies past 8 KB, so planted values need an
/// image long enough to cover them (and the playtime triple).
fn make_long_gen1_save() -> Vec<u8> {
    vec![0u8; 0x2CF1]
}

#[test]
fn test_all_zero_save() {
    let save = make_gen1_save();
    let out = Gen1Extractor::new().extract(&save, &SilentTrace);
    let r = &out.value;
    assert_eq!(r.badges, 0);
    assert_eq!(r.dex_completion_percent, 0);
    assert_eq!(r.playtime_hours, 0);
    assert_eq!(r.estimated_game_label, "Pokemon Red/Blue/Yellow");
    assert_eq!(r.format, DetectedFormat::GameBoy8K);
    assert!(out.degradations.contains(&Degradation::BadgesNotFound));
    assert!(out.degradations.contains(&Degradation::DexNotFound));
}

#[test]
fn test_empty_buffer_is_in_bounds() {
    let out = Gen1Extractor::new().extract(&[], &SilentTrace);
    assert_eq!(out.value.badges, 0);
    assert_eq!(out.value.dex_completion_percent, 0);
    assert_eq!(out.value.playtime_hours, 0);
}

#[test]
fn test_badges_fall_through_to_later_offset() {
    let mut save = make_long_gen1_save();
    save[0x25F8] = 0b0000_1111;
    let out = Gen1Extractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.badges, 4);
    assert_eq!(out.value.estimated_game_label, "Pokemon Red/Blue/Yellow");
}

#[test]
fn test_all_badges_upgrade_label() {
    let mut save = make_long_gen1_save();
    save[0x2625] = 0xFF;
    let out = Gen1Extractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.badges, 8);
    assert_eq!(
        out.value.estimated_game_label,
        "Pokemon Red/Blue/Yellow (Complete)"
    );
}

#[test]
fn test_full_dex() {
    let mut save = make_long_gen1_save();
    // 18 full bytes plus 7 bits = 151 species.
    save[0x25B6..0x25B6 + 18].fill(0xFF);
    save[0x25B6 + 18] = 0x7F;
    let out = Gen1Extractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.dex_completion_percent, 100);
}

#[test]
fn test_overfull_dex_window_is_discarded() {
    let mut save = make_long_gen1_save();
    // 152 bits at the first candidate is more than the roster holds.
    save[0x25B6..0x25B6 + 19].fill(0xFF);
    let trace = RecordingTrace::new();
    let out = Gen1Extractor::new().extract(&save, &trace);
    // The shifted window at 0x25B5 sees 18 full bytes = 144 species.
    assert_eq!(out.value.dex_completion_percent, 95);
    let kept = trace.accepted(ProbeKind::Dex).unwrap();
    assert_eq!(kept.offset, 0x25B5);
}

#[test]
fn test_playtime_needs_long_buffer() {
    let mut save = make_long_gen1_save();
    save[0x2CED] = 42;
    let out = Gen1Extractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.playtime_hours, 42);

    // An 8 KB image ends before the playtime triple.
    let out = Gen1Extractor::new().extract(&make_gen1_save(), &SilentTrace);
    assert!(
        out.degradations
            .contains(&Degradation::PlaytimeOutOfBounds { offset: 0x2CED })
    );
}

#[test]
fn test_planted_values_are_lost_in_8k_image() {
    // The same bytes the long-image tests plant cannot exist in 8 KB, so a
    // standard-length save reports nothing.
    let out = Gen1Extractor::new().extract(&make_gen1_save(), &SilentTrace);
    assert!(out.degradations.contains(&Degradation::BadgesNotFound));
    assert!(out.degradations.contains(&Degradation::DexNotFound));
    assert!(BADGE_OFFSETS.iter().all(|&o| o >= 8 * 1024));
    assert!(DEX_OFFSETS.iter().all(|&o| o >= 8 * 1024));
}

#[test]
fn test_trace_sees_every_candidate() {
    let trace = RecordingTrace::new();
    Gen1Extractor::new().extract(&make_gen1_save(), &trace);
    // Three badge and three dex candidates, playtime skipped.
    assert_eq!(trace.len(), 6);
    assert!(trace.probes().iter().all(|p| !p.accepted));
}

#[test]
fn test_fallback() {
    let ex = Gen1Extractor::new();
    let fb = ex.fallback();
    assert_eq!(fb.estimated_game_label, "Pokemon (Gen 1)");
    assert_eq!(fb.badges, 0);
    assert_eq!(ex.badge_cap(), 8);
    assert_eq!(ex.species_total(), 151);
}
