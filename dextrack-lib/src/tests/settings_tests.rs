use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let (settings, sources) =
        Settings::resolve(&SettingOverrides::default(), &SettingsFile::default(), env_from(&[]))
            .unwrap();
    assert_eq!(settings.game_match_policy, GameMatchPolicy::Advisory);
    assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
    assert_eq!(settings.catalog_dir, PathBuf::from("catalog"));
    assert_eq!(sources.database_path, SettingSource::Default);
    assert_eq!(sources.max_upload_bytes, SettingSource::Default);
}

#[test]
fn test_priority_chain() {
    let file = SettingsFile {
        database_path: Some(PathBuf::from("/file/db.sqlite")),
        catalog_dir: Some(PathBuf::from("/file/catalog")),
        game_match_policy: Some(GameMatchPolicy::Strict),
        max_upload_bytes: Some(1000),
    };
    let overrides = SettingOverrides {
        database_path: Some(PathBuf::from("/cli/db.sqlite")),
        ..Default::default()
    };
    let env = env_from(&[
        ("DEXTRACK_DB", "/env/db.sqlite"),
        ("DEXTRACK_CATALOG_DIR", "/env/catalog"),
    ]);

    let (settings, sources) = Settings::resolve(&overrides, &file, env).unwrap();
    assert_eq!(settings.database_path, PathBuf::from("/cli/db.sqlite"));
    assert_eq!(sources.database_path, SettingSource::CommandLine);
    assert_eq!(settings.catalog_dir, PathBuf::from("/env/catalog"));
    assert_eq!(sources.catalog_dir, SettingSource::EnvVar("DEXTRACK_CATALOG_DIR"));
    assert_eq!(settings.game_match_policy, GameMatchPolicy::Strict);
    assert_eq!(sources.game_match_policy, SettingSource::ConfigFile);
    assert_eq!(settings.max_upload_bytes, 1000);
}

#[test]
fn test_empty_env_var_is_ignored() {
    let (settings, sources) = Settings::resolve(
        &SettingOverrides::default(),
        &SettingsFile::default(),
        env_from(&[("DEXTRACK_GAME_MATCH", "")]),
    )
    .unwrap();
    assert_eq!(settings.game_match_policy, GameMatchPolicy::Advisory);
    assert_eq!(sources.game_match_policy, SettingSource::Default);
}

#[test]
fn test_invalid_env_values() {
    let err = Settings::resolve(
        &SettingOverrides::default(),
        &SettingsFile::default(),
        env_from(&[("DEXTRACK_GAME_MATCH", "lenient")]),
    )
    .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue { .. }));

    let err = Settings::resolve(
        &SettingOverrides::default(),
        &SettingsFile::default(),
        env_from(&[("DEXTRACK_MAX_UPLOAD_BYTES", "ten")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("max_upload_bytes"));
}

#[test]
fn test_policy_parsing() {
    assert_eq!("STRICT".parse::<GameMatchPolicy>().unwrap(), GameMatchPolicy::Strict);
    assert_eq!(" advisory ".parse::<GameMatchPolicy>().unwrap(), GameMatchPolicy::Advisory);
    assert!("off".parse::<GameMatchPolicy>().is_err());
    assert_eq!(GameMatchPolicy::Strict.to_string(), "strict");
}

#[test]
fn test_source_display() {
    assert_eq!(SettingSource::EnvVar("DEXTRACK_DB").to_string(), "env $DEXTRACK_DB");
    assert_eq!(SettingSource::ConfigFile.to_string(), "config file");
}

#[test]
fn test_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = load_settings_file(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(file, SettingsFile::default());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "max_upload_bytes = [").unwrap();
    let err = load_settings_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
}

#[test]
fn test_save_and_unset_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    save_setting_at(&path, "game_match_policy", "Strict").unwrap();
    save_setting_at(&path, "max_upload_bytes", "2048").unwrap();
    save_setting_at(&path, "catalog_dir", "/data/catalog").unwrap();

    let file = load_settings_file(&path).unwrap();
    assert_eq!(file.game_match_policy, Some(GameMatchPolicy::Strict));
    assert_eq!(file.max_upload_bytes, Some(2048));
    assert_eq!(file.catalog_dir, Some(PathBuf::from("/data/catalog")));
    assert_eq!(file.database_path, None);

    unset_setting_at(&path, "max_upload_bytes").unwrap();
    let file = load_settings_file(&path).unwrap();
    assert_eq!(file.max_upload_bytes, None);
    assert_eq!(file.game_match_policy, Some(GameMatchPolicy::Strict));
}

#[test]
fn test_save_preserves_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[ui]\ntheme = \"dark\"\n").unwrap();

    save_setting_at(&path, "database_path", "/tmp/x.db").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("theme = \"dark\""));
    assert!(contents.contains("database_path"));
}

#[test]
fn test_save_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    assert!(matches!(
        save_setting_at(&path, "colour", "blue"),
        Err(SettingsError::UnknownKey(_))
    ));
    assert!(save_setting_at(&path, "max_upload_bytes", "0").is_err());
    assert!(save_setting_at(&path, "game_match_policy", "maybe").is_err());
    assert!(!path.exists());
}
