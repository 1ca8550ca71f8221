//! Save-file parsing and shared application settings.
//!
//! [`SaveFileParser`] is the entry point: it classifies a blob by size and
//! hands it to the matching [`GenerationExtractor`].

pub mod classifier;
pub mod error;
pub mod parser;
pub mod settings;

pub use classifier::FormatClassifier;
pub use error::SettingsError;
pub use parser::SaveFileParser;
pub use settings::{
    GameMatchPolicy, SettingOverrides, SettingSource, SettingSources, Settings, SettingsFile,
};

// Re-export the core types so downstream crates need only one dependency.
pub use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, FormatFamily, GenerationExtractor,
    LogTrace, Probe, ProbeKind, ProbeTrace, RecordingTrace, SilentTrace,
};
pub use dextrack_core::util;
