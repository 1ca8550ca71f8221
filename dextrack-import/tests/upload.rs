mod common;

use common::*;
use dextrack_catalog::{ContentType, ProgressStatus};
use dextrack_db::{content_for_game, creatures_for_game, get_progress, tracker_entries};
use dextrack_import::*;
use dextrack_lib::{DetectedFormat, GameMatchPolicy, SaveFileParser, Settings};

fn upload(
    conn: &rusqlite::Connection,
    policy: GameMatchPolicy,
    game_id: i64,
    name: &str,
    bytes: Vec<u8>,
) -> Result<UploadOutcome, UploadError> {
    upload_save_with(
        conn,
        &SaveFileParser::standard(),
        policy,
        "ash",
        game_id,
        Some(SaveUpload::new(name, bytes)),
    )
}

#[test]
fn missing_file_is_rejected() {
    let conn = seeded_db();
    let err = upload_save(&conn, &Settings::default(), "ash", EMERALD, None).unwrap_err();
    assert!(matches!(err, UploadError::NoFile));
}

#[test]
fn unknown_game_is_rejected() {
    let conn = seeded_db();
    let err = upload(&conn, GameMatchPolicy::Advisory, 404, "x.sav", make_gen1_save()).unwrap_err();
    assert!(matches!(err, UploadError::GameNotFound(404)));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM user_progress"), 0);
}

#[test]
fn blank_gen1_save_only_marks_progress() {
    let conn = seeded_db();
    let outcome = upload(&conn, GameMatchPolicy::Advisory, RED, "red.sav", make_gen1_save()).unwrap();

    assert_eq!(outcome.format, DetectedFormat::GameBoy8K);
    assert_eq!(outcome.detected_game, "Pokemon Red/Blue/Yellow");
    assert!(outcome.game_matches);
    assert_eq!(outcome.validation_warning, None);
    assert_eq!(outcome.auto_populated.gyms_completed, 0);
    assert_eq!(outcome.auto_populated.dex_progress, 0);

    assert_eq!(outcome.progress.status, ProgressStatus::InProgress);
    assert!(outcome.progress.save_file_imported);
    assert_eq!(outcome.progress.save_file_name.as_deref(), Some("red.sav"));

    assert!(tracker_entries(&conn, "ash", RED).unwrap().is_empty());
    assert!(creatures_for_game(&conn, "ash", RED).unwrap().is_empty());
}

#[test]
fn emerald_save_fills_gyms_dex_and_creatures() {
    let conn = seeded_db();
    let outcome = upload(
        &conn,
        GameMatchPolicy::Advisory,
        EMERALD,
        "emerald.sav",
        make_gba_save(0xFF, 77),
    )
    .unwrap();

    assert_eq!(outcome.format, DetectedFormat::GameBoyAdvance128K);
    assert_eq!(outcome.extraction.badges, 8);
    assert_eq!(outcome.extraction.dex_completion_percent, 20);
    assert!(outcome.game_matches);
    assert_eq!(outcome.auto_populated.gyms_completed, 8);
    assert_eq!(outcome.stats.creatures_inserted, 30);
    assert!(outcome.stats.dex_milestone_completed);
    assert_eq!(outcome.stats.failures, 0);

    let content = content_for_game(&conn, EMERALD).unwrap();
    let entries = tracker_entries(&conn, "ash", EMERALD).unwrap();
    assert_eq!(entries.len(), 9);
    let completed_types: Vec<ContentType> = entries
        .iter()
        .filter(|t| t.is_completed)
        .map(|t| {
            content
                .iter()
                .find(|c| c.id == t.content_id)
                .unwrap()
                .content_type
                .clone()
        })
        .collect();
    assert_eq!(
        completed_types
            .iter()
            .filter(|t| **t == ContentType::Gym)
            .count(),
        8
    );
    assert!(completed_types.contains(&ContentType::PokemonCatch));

    let creatures = creatures_for_game(&conn, "ash", EMERALD).unwrap();
    assert_eq!(creatures.len(), 30);
    assert!(creatures.iter().all(|c| c.origin_game_id == Some(EMERALD)));
    assert!(creatures.iter().any(|c| c.creature_name == "Bulbasaur"));
    assert!(creatures.iter().any(|c| c.creature_name == "Nidorina"));
    assert!(!creatures.iter().any(|c| c.creature_name == "Nidoqueen"));
}

#[test]
fn reupload_is_idempotent() {
    let conn = seeded_db();
    let save = make_gba_save(0xFF, 77);
    upload(&conn, GameMatchPolicy::Advisory, EMERALD, "a.sav", save.clone()).unwrap();
    let before_tracker = tracker_entries(&conn, "ash", EMERALD).unwrap();

    let again = upload(&conn, GameMatchPolicy::Advisory, EMERALD, "a.sav", save).unwrap();
    assert_eq!(again.stats.creatures_inserted, 0);
    assert_eq!(again.stats.creatures_existing, 30);
    assert_eq!(again.stats.gyms_newly_completed, 0);
    assert_eq!(again.auto_populated.gyms_completed, 8);

    let after_tracker = tracker_entries(&conn, "ash", EMERALD).unwrap();
    assert_eq!(before_tracker, after_tracker);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM user_pokemon"), 30);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM user_progress"), 1);
}

#[test]
fn fewer_badges_never_uncomplete_gyms() {
    let conn = seeded_db();
    upload(&conn, GameMatchPolicy::Advisory, EMERALD, "late.sav", make_gba_save(0xFF, 0)).unwrap();
    let outcome =
        upload(&conn, GameMatchPolicy::Advisory, EMERALD, "early.sav", make_gba_save(0x07, 0))
            .unwrap();

    assert_eq!(outcome.extraction.badges, 3);
    assert_eq!(outcome.stats.gyms_newly_completed, 0);
    let completed = tracker_entries(&conn, "ash", EMERALD)
        .unwrap()
        .into_iter()
        .filter(|t| t.is_completed)
        .count();
    assert_eq!(completed, 8);
}

#[test]
fn partial_badges_complete_first_gyms_in_order() {
    let conn = seeded_db();
    upload(&conn, GameMatchPolicy::Advisory, EMERALD, "e.sav", make_gba_save(0x07, 0)).unwrap();

    let content = content_for_game(&conn, EMERALD).unwrap();
    let first_gyms: Vec<i64> = content
        .iter()
        .filter(|c| c.content_type == ContentType::Gym)
        .take(3)
        .map(|c| c.id)
        .collect();
    let completed: Vec<i64> = tracker_entries(&conn, "ash", EMERALD)
        .unwrap()
        .into_iter()
        .filter(|t| t.is_completed)
        .map(|t| t.content_id)
        .collect();
    assert_eq!(completed, first_gyms);
}

#[test]
fn advisory_mismatch_warns_and_proceeds() {
    let conn = seeded_db();
    let outcome =
        upload(&conn, GameMatchPolicy::Advisory, EMERALD, "red.sav", make_gen1_save()).unwrap();
    assert!(!outcome.game_matches);
    assert!(outcome.validation_warning.is_some());
    assert_eq!(outcome.target_game.id, EMERALD);
    assert!(get_progress(&conn, "ash", EMERALD).unwrap().is_some());
}

#[test]
fn strict_mismatch_is_rejected_without_writes() {
    let conn = seeded_db();
    let err = upload(&conn, GameMatchPolicy::Strict, EMERALD, "red.sav", make_gen1_save())
        .unwrap_err();
    match err {
        UploadError::DetectionMismatch { detected, game } => {
            assert_eq!(detected, "Pokemon Red/Blue/Yellow");
            assert_eq!(game, "Pokémon Emerald");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(get_progress(&conn, "ash", EMERALD).unwrap().is_none());

    // A matching save passes under the same policy
    upload(&conn, GameMatchPolicy::Strict, EMERALD, "e.sav", make_gba_save(0x01, 0)).unwrap();
}

#[test]
fn manual_stats_mark_progress() {
    let conn = seeded_db();
    let stats = ManualStats {
        hours_played: Some(42),
        creatures_caught: Some(100),
        dex_completion_percent: Some(50),
        badges: Some(6),
    };
    let outcome = record_manual_stats(&conn, "ash", RED, stats).unwrap();
    assert_eq!(outcome.stats, stats);
    assert!(outcome.progress.save_file_imported);
    assert_eq!(outcome.progress.status, ProgressStatus::InProgress);
    assert!(tracker_entries(&conn, "ash", RED).unwrap().is_empty());

    assert!(matches!(
        record_manual_stats(&conn, "ash", 404, stats),
        Err(UploadError::GameNotFound(404))
    ));
}
