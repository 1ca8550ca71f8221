use super::*;
use dextrack_core::{ProbeKind, RecordingTrace, SilentTrace};

/// Build a blank 128 KB flash save.
fn make_gba_save() -> Vec<u8> {
    vec![0u8; 128 * 1024]
}

#[test]
fn test_badge_byte_full() {
    let mut save = make_gba_save();
    save[0x20] = 0xFF;
    let out = GbaExtractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.badges, 8);
    assert_eq!(out.value.estimated_game_label, "Pokemon Emerald/Ruby/Sapphire");
}

#[test]
fn test_no_badges_keeps_default_label() {
    let out = GbaExtractor::new().extract(&make_gba_save(), &SilentTrace);
    assert_eq!(out.value.badges, 0);
    assert_eq!(out.value.estimated_game_label, "Pokemon Emerald");
    assert_eq!(out.value.format, DetectedFormat::GameBoyAdvance128K);
}

#[test]
fn test_empty_buffer() {
    let out = GbaExtractor::new().extract(&[], &SilentTrace);
    assert_eq!(out.value.badges, 0);
    assert_eq!(out.value.dex_completion_percent, 0);
    assert_eq!(out.value.playtime_hours, 0);
}

#[test]
fn test_dex_takes_largest_window() {
    let mut save = make_gba_save();
    save[0x27A] = 0xFF;
    save[0x500..0x500 + 26].fill(0xFF);
    let trace = RecordingTrace::new();
    let out = GbaExtractor::new().extract(&save, &trace);
    // 208 of 386 species.
    assert_eq!(out.value.dex_completion_percent, 54);
    assert_eq!(trace.accepted(ProbeKind::Dex).map(|p| p.offset), Some(0x500));
}

#[test]
fn test_playtime_little_endian_and_clamped() {
    let mut save = make_gba_save();
    save[0x800] = 0x34;
    save[0x801] = 0x01;
    let out = GbaExtractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.playtime_hours, 0x134);

    save[0x800] = 0xFF;
    save[0x801] = 0xFF;
    let out = GbaExtractor::new().extract(&save, &SilentTrace);
    assert_eq!(out.value.playtime_hours, 9999);
}

#[test]
fn test_fallback_label() {
    assert_eq!(GbaExtractor::new().fallback().estimated_game_label, "Pokemon Emerald");
    assert_eq!(GbaExtractor::new().species_total(), 386);
}
