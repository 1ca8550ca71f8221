mod common;

use std::fs;
use std::path::PathBuf;

use common::*;
use dextrack_catalog::types::CatalogGame;
use dextrack_import::*;
use dextrack_lib::{DetectedFormat, GameMatchPolicy, SaveFileParser};

fn options() -> BulkOptions {
    BulkOptions {
        user_id: "ash".to_string(),
        policy: GameMatchPolicy::Advisory,
        max_file_bytes: 200_000,
    }
}

fn name_of(outcome: &BulkOutcome) -> String {
    outcome.file().file_name().unwrap().to_string_lossy().to_string()
}

#[test]
fn extension_filter() {
    assert!(is_save_file(&PathBuf::from("emerald.sav")));
    assert!(is_save_file(&PathBuf::from("RED.SAV")));
    assert!(is_save_file(&PathBuf::from("x.3ds")));
    assert!(!is_save_file(&PathBuf::from("notes.txt")));
    assert!(!is_save_file(&PathBuf::from("sav")));
}

#[test]
fn bulk_import_mixed_folder() {
    let conn = seeded_db();
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("emerald.sav"), make_gba_save(0xFF, 77)).unwrap();
    fs::write(tmp.path().join("red.SAV"), make_gen1_save()).unwrap();
    fs::write(tmp.path().join("notes.txt"), b"hello").unwrap();
    fs::write(tmp.path().join("diamond.sav"), vec![0u8; 524288]).unwrap();

    let files = collect_files(tmp.path()).unwrap();
    assert_eq!(files.len(), 4);

    let report = bulk_import(
        &conn,
        &SaveFileParser::standard(),
        &files,
        &options(),
        Some(&SilentProgress),
    )
    .unwrap();

    assert_eq!(
        report.stats,
        BulkStats {
            imported: 2,
            unmatched: 0,
            skipped: 2,
            failed: 0,
        }
    );

    for outcome in &report.outcomes {
        match (name_of(outcome).as_str(), outcome) {
            ("emerald.sav", BulkOutcome::Imported { upload, .. }) => {
                assert_eq!(upload.target_game.id, EMERALD);
                assert_eq!(upload.auto_populated.gyms_completed, 8);
            }
            ("red.SAV", BulkOutcome::Imported { upload, .. }) => {
                assert_eq!(upload.target_game.id, RED);
            }
            ("notes.txt", BulkOutcome::Skipped { reason, .. }) => {
                assert_eq!(*reason, SkipReason::UnsupportedExtension);
            }
            ("diamond.sav", BulkOutcome::Skipped { reason, .. }) => {
                assert!(matches!(reason, SkipReason::TooLarge { size: 524288, .. }));
            }
            (name, other) => panic!("unexpected outcome for {name}: {other}"),
        }
    }

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM user_progress"), 2);
}

#[test]
fn unmatched_file_is_reported_and_batch_continues() {
    let conn = dextrack_db::open_memory().unwrap();
    let sword = CatalogGame {
        id: 20,
        name: "Pokémon Sword".to_string(),
        platform: "Nintendo Switch".to_string(),
        generation: Some(8),
        release_year: Some(2019),
        completion_time_hours: None,
        content: vec![],
    };
    dextrack_db::upsert_game(&conn, &sword).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.sav");
    let b = tmp.path().join("b.sav");
    fs::write(&a, make_gen1_save()).unwrap();
    fs::write(&b, make_gba_save(0, 0)).unwrap();

    let report = bulk_import(
        &conn,
        &SaveFileParser::standard(),
        &[a, b],
        &options(),
        None,
    )
    .unwrap();

    assert_eq!(report.stats.unmatched, 2);
    match &report.outcomes[0] {
        BulkOutcome::Unmatched { format, label, .. } => {
            assert_eq!(*format, DetectedFormat::GameBoy8K);
            assert_eq!(label, "Pokemon Red/Blue/Yellow");
        }
        other => panic!("expected unmatched, got {other}"),
    }
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM user_progress"), 0);
}

#[test]
fn missing_file_fails_without_aborting() {
    let conn = seeded_db();
    let tmp = tempfile::tempdir().unwrap();
    let gone = tmp.path().join("gone.sav");
    let red = tmp.path().join("red.sav");
    fs::write(&red, make_gen1_save()).unwrap();

    let report = bulk_import(
        &conn,
        &SaveFileParser::standard(),
        &[gone, red],
        &options(),
        None,
    )
    .unwrap();

    assert!(matches!(report.outcomes[0], BulkOutcome::Failed { .. }));
    assert!(matches!(report.outcomes[1], BulkOutcome::Imported { .. }));
}

#[test]
fn collect_files_reports_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let err = collect_files(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, BulkError::ReadDir { .. }));
}
