use dextrack_catalog::{CatalogMatcher, Game, MatchReason};
use dextrack_core::DetectedFormat;

fn game(id: i64, name: &str, platform: &str) -> Game {
    Game {
        id,
        name: name.to_string(),
        platform: platform.to_string(),
        generation: None,
        release_year: None,
        completion_time_hours: None,
    }
}

fn catalog() -> Vec<Game> {
    vec![
        game(1, "Pokémon Red", "Game Boy"),
        game(2, "Pokémon Blue", "Game Boy"),
        game(4, "Pokémon Gold", "Game Boy Color"),
        game(7, "Pokémon Ruby", "Game Boy Advance"),
        game(9, "Pokémon Emerald", "Game Boy Advance"),
        game(12, "Pokémon Diamond", "Nintendo DS"),
        game(20, "Pokémon Sword", "Nintendo Switch"),
    ]
}

#[test]
fn keyword_selects_emerald() {
    let games = catalog();
    let matcher = CatalogMatcher::new(&games);
    let m = matcher
        .find_with_reason("Pokemon Emerald", DetectedFormat::GameBoyAdvance128K)
        .unwrap();
    assert_eq!(m.game.id, 9);
    assert_eq!(m.reason, MatchReason::Keyword { keyword: "emerald" });
}

#[test]
fn multi_title_labels_use_table_order() {
    let games = catalog();
    let matcher = CatalogMatcher::new(&games);

    let red = matcher.find("Pokemon Red/Blue/Yellow", DetectedFormat::GameBoy8K);
    assert_eq!(red.map(|g| g.id), Some(1));

    let emerald = matcher.find(
        "Pokemon Emerald/Ruby/Sapphire",
        DetectedFormat::GameBoyAdvance128K,
    );
    assert_eq!(emerald.map(|g| g.id), Some(9));

    let ruby = matcher.find("Pokemon Ruby", DetectedFormat::GameBoyAdvance128K);
    assert_eq!(ruby.map(|g| g.id), Some(7));

    let gold = matcher.find("Pokemon Gold/Silver/Crystal (Complete)", DetectedFormat::GameBoyColor32K);
    assert_eq!(gold.map(|g| g.id), Some(4));

    let diamond = matcher.find(
        "Pokemon Diamond/Pearl/Platinum/Black/White",
        DetectedFormat::NintendoDs512K,
    );
    assert_eq!(diamond.map(|g| g.id), Some(12));
}

#[test]
fn keyword_without_catalog_entry_falls_through() {
    // No Yellow in the catalog; the overlap pass still finds a Game Boy title
    let games = catalog();
    let matcher = CatalogMatcher::new(&games);
    let m = matcher
        .find_with_reason("Pokemon Yellow", DetectedFormat::GameBoy8K)
        .unwrap();
    assert_eq!(m.reason, MatchReason::TokenOverlap);
    assert_eq!(m.game.platform, "Game Boy");
}

#[test]
fn overlap_respects_platform_family() {
    let games = vec![
        game(20, "Pokémon Sword", "Nintendo Switch"),
        game(12, "Pokémon Diamond", "Nintendo DS"),
    ];
    let matcher = CatalogMatcher::new(&games);

    // Switch is neither Game Boy nor DS
    assert!(matcher.find("Pokemon (Gen 1)", DetectedFormat::GameBoy8K).is_none());

    let ds = matcher.find("Pokemon (DS)", DetectedFormat::NintendoDs512K);
    assert_eq!(ds.map(|g| g.id), Some(12));

    // Unknown formats are not filtered
    let any = matcher.find("Pokemon", DetectedFormat::Unknown);
    assert_eq!(any.map(|g| g.id), Some(20));
}

#[test]
fn gba_platform_fallback() {
    let games = vec![
        game(30, "Mystery Dungeon", "Game Boy Advance"),
        game(31, "Another GBA Title", "Game Boy Advance"),
    ];
    let matcher = CatalogMatcher::new(&games);
    let m = matcher
        .find_with_reason("Pokemon Emerald", DetectedFormat::GameBoyAdvance128K)
        .unwrap();
    assert_eq!(m.game.id, 30);
    assert_eq!(m.reason, MatchReason::PlatformFallback);
}

#[test]
fn no_match_is_none() {
    let games = vec![game(20, "Sword", "Nintendo Switch")];
    let matcher = CatalogMatcher::new(&games);
    assert!(matcher.find("Pokemon Emerald", DetectedFormat::GameBoyAdvance128K).is_none());
    assert!(matcher.find("Pokemon (DS)", DetectedFormat::NintendoDs512K).is_none());

    let empty: Vec<Game> = Vec::new();
    assert!(CatalogMatcher::new(&empty)
        .find("Pokemon Red/Blue/Yellow", DetectedFormat::GameBoy8K)
        .is_none());
}
