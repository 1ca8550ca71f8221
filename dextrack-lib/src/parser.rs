//! Save-file parser: classification plus extractor dispatch.

use std::panic::{self, AssertUnwindSafe};

use dextrack_core::{
    BestEffort, Degradation, DetectedFormat, ExtractionResult, GenerationExtractor, ProbeTrace,
    SilentTrace,
};

use crate::classifier::FormatClassifier;

/// Holds the registered generation extractors.
///
/// This is the main entry point for turning raw save bytes into progress
/// numbers. Create a parser, register extractors (or use
/// [`SaveFileParser::standard`]), then call [`parse`](Self::parse).
pub struct SaveFileParser {
    classifier: FormatClassifier,
    extractors: Vec<Box<dyn GenerationExtractor>>,
}

impl Default for SaveFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveFileParser {
    /// Create a parser with no extractors.
    pub fn new() -> Self {
        Self {
            classifier: FormatClassifier::new(),
            extractors: Vec::new(),
        }
    }

    /// Create a parser with the four Nintendo handheld extractors.
    pub fn standard() -> Self {
        let mut parser = Self::new();
        parser
            .register(dextrack_nintendo::Gen1Extractor::new())
            .register(dextrack_nintendo::Gen2Extractor::new())
            .register(dextrack_nintendo::GbaExtractor::new())
            .register(dextrack_nintendo::DsExtractor::new());
        parser
    }

    /// Register an extractor. A later registration for the same format
    /// replaces the earlier one.
    pub fn register<E: GenerationExtractor + 'static>(&mut self, extractor: E) -> &mut Self {
        let format = extractor.format();
        self.extractors.retain(|e| e.format() != format);
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Get the extractor registered for a format.
    pub fn extractor_for(&self, format: DetectedFormat) -> Option<&dyn GenerationExtractor> {
        self.extractors
            .iter()
            .find(|e| e.format() == format)
            .map(|e| e.as_ref())
    }

    /// Formats that currently have an extractor.
    pub fn formats(&self) -> Vec<DetectedFormat> {
        self.extractors.iter().map(|e| e.format()).collect()
    }

    /// Parse a save blob without tracing.
    pub fn parse(&self, data: &[u8]) -> BestEffort<ExtractionResult> {
        self.parse_with_trace(data, &SilentTrace)
    }

    /// Parse a save blob, reporting every probe to `trace`.
    ///
    /// Never fails. A panicking extractor is replaced by its fallback result
    /// and the panic is recorded as a degradation. The badge count is held to
    /// the extractor's cap whatever the extractor reports.
    pub fn parse_with_trace(
        &self,
        data: &[u8],
        trace: &dyn ProbeTrace,
    ) -> BestEffort<ExtractionResult> {
        let classified = self.classifier.classify(data.len());
        let format = classified.value;
        let mut degradations = classified.degradations;

        log::debug!("{} bytes classified as {}", data.len(), format);

        let Some(extractor) = self.extractor_for(format) else {
            log::warn!("No extractor registered for {}", format);
            degradations.push(Degradation::NoExtractor { format });
            return BestEffort::degraded(ExtractionResult::empty("Unknown", format), degradations);
        };

        let mut result =
            match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(data, trace))) {
                Ok(extracted) => {
                    degradations.extend(extracted.degradations);
                    extracted.value
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    log::warn!("{} extractor panicked: {}", format, message);
                    degradations.push(Degradation::ExtractorPanicked { format, message });
                    extractor.fallback()
                }
            };

        result.format = format;
        result.badges = result.badges.min(extractor.badge_cap());
        log::debug!(
            "Extracted: {} badges, {}% dex, {}h ({})",
            result.badges,
            result.dex_completion_percent,
            result.playtime_hours,
            result.estimated_game_label
        );
        BestEffort::degraded(result, degradations)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod tests;
