mod common;

use common::*;
use dextrack_catalog::types::*;
use dextrack_db::{get_game, tracker_entries};
use dextrack_import::*;
use dextrack_lib::{DetectedFormat, ExtractionResult};

fn item(id: i64, kind: ContentType) -> ContentItem {
    ContentItem {
        id,
        game_id: 9,
        name: format!("item {id}"),
        content_type: kind,
        order_num: id,
        description: None,
    }
}

fn checklist() -> Vec<ContentItem> {
    let mut items: Vec<ContentItem> = (1..=8).map(|id| item(id, ContentType::Gym)).collect();
    items.insert(4, item(100, ContentType::Story));
    items.push(item(20, ContentType::PokemonCatch));
    items.push(item(21, ContentType::PokemonCatch));
    items.push(item(30, ContentType::EliteFour));
    items
}

fn completed(content_id: i64) -> TrackerEntry {
    TrackerEntry {
        id: content_id * 10,
        user_id: "ash".to_string(),
        game_id: 9,
        content_id,
        is_completed: true,
        completed_at: Some("2024-01-01 00:00:00".to_string()),
        updated_at: "2024-01-01 00:00:00".to_string(),
    }
}

fn extraction(badges: u8, percent: u8) -> ExtractionResult {
    ExtractionResult::empty("Pokemon Emerald", DetectedFormat::GameBoyAdvance128K)
        .with_badges(badges)
        .with_dex_percent(percent)
}

#[test]
fn plan_targets_first_gyms_only() {
    let plan = plan_population(&extraction(5, 0), &checklist(), &[]);
    assert_eq!(plan.gyms, vec![1, 2, 3, 4, 5]);
    assert_eq!(plan.dex_milestone, None);
    assert!(plan.creatures.is_empty());
}

#[test]
fn plan_skips_completed_entries() {
    let existing = vec![completed(1), completed(2), completed(20)];
    let plan = plan_population(&extraction(3, 50), &checklist(), &existing);
    assert_eq!(plan.gyms, vec![3]);
    assert_eq!(plan.gyms_already_completed, 2);
    assert_eq!(plan.dex_milestone, None);
    assert!(plan.dex_milestone_already_completed);
}

#[test]
fn plan_caps_badges_at_gym_count() {
    let plan = plan_population(&extraction(16, 0), &checklist(), &[]);
    assert_eq!(plan.gyms.len(), 8);
}

#[test]
fn dex_milestone_threshold() {
    let below = plan_population(&extraction(0, 9), &checklist(), &[]);
    assert_eq!(below.dex_milestone, None);
    assert_eq!(below.creatures.len(), 13);

    let at = plan_population(&extraction(0, DEX_MILESTONE_PERCENT), &checklist(), &[]);
    assert_eq!(at.dex_milestone, Some(20));
    assert_eq!(at.creatures.len(), 15);
    assert_eq!(at.creatures[0], (1, "Bulbasaur"));
}

#[test]
fn full_dex_is_whole_roster() {
    let plan = plan_population(&extraction(0, 100), &[], &[]);
    assert_eq!(plan.creatures.len(), 151);
    assert_eq!(plan.creatures[150], (151, "Mew"));
    assert_eq!(plan.dex_milestone, None);
}

#[test]
fn auto_populate_against_database() {
    let conn = seeded_db();
    let game = get_game(&conn, EMERALD).unwrap().unwrap();
    let result = extraction(2, 10);

    let outcome = auto_populate(
        &conn,
        &PopulateRequest {
            user_id: "may",
            game: &game,
            file_name: None,
            extraction: &result,
        },
    )
    .unwrap();

    assert_eq!(outcome.progress.save_file_name, None);
    assert_eq!(outcome.stats.gyms_completed, 2);
    assert_eq!(outcome.stats.gyms_newly_completed, 2);
    assert!(outcome.stats.dex_milestone_completed);
    assert_eq!(outcome.stats.creatures_inserted, 15);
    assert_eq!(tracker_entries(&conn, "may", EMERALD).unwrap().len(), 3);

    let rerun = auto_populate(
        &conn,
        &PopulateRequest {
            user_id: "may",
            game: &game,
            file_name: Some("may.sav"),
            extraction: &result,
        },
    )
    .unwrap();
    assert_eq!(rerun.stats.gyms_newly_completed, 0);
    assert_eq!(rerun.stats.creatures_inserted, 0);
    assert_eq!(rerun.progress.id, outcome.progress.id);
    assert_eq!(rerun.progress.save_file_name.as_deref(), Some("may.sav"));
}
