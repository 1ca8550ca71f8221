use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use dextrack_lib::settings::{SETTING_KEYS, save_setting, settings_path, unset_setting};
use dextrack_lib::{SettingSource, SettingSources, Settings};

use crate::CliError;

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(settings: &Settings, sources: &SettingSources) {
    let path = settings_path();

    log::info!(
        "{}",
        "dextrack Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let fields: [(&str, String, SettingSource); 4] = [
        (
            "database_path",
            settings.database_path.display().to_string(),
            sources.database_path,
        ),
        (
            "catalog_dir",
            settings.catalog_dir.display().to_string(),
            sources.catalog_dir,
        ),
        (
            "game_match_policy",
            settings.game_match_policy.to_string(),
            sources.game_match_policy,
        ),
        (
            "max_upload_bytes",
            settings.max_upload_bytes.to_string(),
            sources.max_upload_bytes,
        ),
    ];

    for (name, value, source) in &fields {
        let source_str = format!("({})", source);
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Set one key in settings.toml.
pub(crate) fn run_config_set(key: &str, value: &str) -> Result<(), CliError> {
    save_setting(key, value).map_err(|e| with_key_hint(key, e))?;
    log::info!(
        "{} {} = {} saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key,
        value,
        settings_path().display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove one key from settings.toml.
pub(crate) fn run_config_unset(key: &str) -> Result<(), CliError> {
    unset_setting(key).map_err(|e| with_key_hint(key, e))?;
    log::info!(
        "{} {} removed from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key,
        settings_path().display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

fn with_key_hint(key: &str, e: dextrack_lib::SettingsError) -> CliError {
    if SETTING_KEYS.contains(&key) {
        e.into()
    } else {
        CliError::other(format!("{} (known keys: {})", e, SETTING_KEYS.join(", ")))
    }
}
