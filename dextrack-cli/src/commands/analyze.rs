use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use dextrack_lib::util::format_bytes;
use dextrack_lib::{
    BestEffort, ExtractionResult, Probe, RecordingTrace, SaveFileParser, Settings, SilentTrace,
};

use crate::CliError;

/// One analyzed file, as printed by `--json`.
#[derive(Serialize)]
struct AnalyzeReport {
    file: PathBuf,
    size: u64,
    #[serde(flatten)]
    result: BestEffort<ExtractionResult>,
    /// Badges and species the detected generation can hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    badge_cap: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    species_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    probes: Option<Vec<Probe>>,
}

/// Run the analyze command.
pub(crate) fn run_analyze(
    settings: &Settings,
    files: &[PathBuf],
    trace: bool,
    json: bool,
) -> Result<(), CliError> {
    let parser = SaveFileParser::standard();
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        match analyze_file(&parser, settings, path, trace) {
            Ok(report) => {
                if !json {
                    print_report(&report);
                }
                reports.push(report);
            }
            Err(e) => log::warn!(
                "{} {}: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                path.display(),
                e,
            ),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn analyze_file(
    parser: &SaveFileParser,
    settings: &Settings,
    path: &Path,
    trace: bool,
) -> Result<AnalyzeReport, CliError> {
    let size = std::fs::metadata(path)?.len();
    if size > settings.max_upload_bytes {
        return Err(CliError::TooLarge {
            path: path.display().to_string(),
            size,
            limit: settings.max_upload_bytes,
        });
    }
    let bytes = std::fs::read(path)?;

    let (result, probes) = if trace {
        let recorder = RecordingTrace::new();
        let result = parser.parse_with_trace(&bytes, &recorder);
        (result, Some(recorder.probes()))
    } else {
        (parser.parse_with_trace(&bytes, &SilentTrace), None)
    };

    let extractor = parser.extractor_for(result.value.format);
    Ok(AnalyzeReport {
        file: path.to_path_buf(),
        size,
        badge_cap: extractor.map(|e| e.badge_cap()),
        species_total: extractor.map(|e| e.species_total()),
        result,
        probes,
    })
}

fn print_report(report: &AnalyzeReport) {
    let value = &report.result.value;
    let file_name = report
        .file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| report.file.display().to_string());

    log::info!(
        "{} ({})",
        file_name.if_supports_color(Stdout, |t| t.bold()),
        format_bytes(report.size),
    );
    log::info!(
        "  Format:    {}",
        value.format.if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!("  Game:      {}", value.estimated_game_label);
    match (report.badge_cap, report.species_total) {
        (Some(cap), Some(total)) => {
            log::info!("  Badges:    {}/{}", value.badges, cap);
            log::info!(
                "  Dex:       {}% of {} species",
                value.dex_completion_percent,
                total
            );
        }
        _ => {
            log::info!("  Badges:    {}", value.badges);
            log::info!("  Dex:       {}%", value.dex_completion_percent);
        }
    }
    log::info!("  Playtime:  {}h", value.playtime_hours);

    for d in &report.result.degradations {
        log::info!(
            "  {} {}",
            "note:".if_supports_color(Stdout, |t| t.dimmed()),
            d
        );
    }

    if let Some(probes) = &report.probes {
        log::info!("  Probes:");
        for probe in probes {
            let value = match probe.value {
                Some(v) => v.to_string(),
                None => "out of bounds".to_string(),
            };
            let line = format!(
                "    {:<9} @0x{:05X}  {}",
                probe.kind.to_string(),
                probe.offset,
                value
            );
            if probe.accepted {
                log::info!("{}", line.if_supports_color(Stdout, |t| t.green()));
            } else {
                log::info!("{}", line.if_supports_color(Stdout, |t| t.dimmed()));
            }
        }
    }
    crate::log_blank();
}
