pub mod extraction;
pub mod format;
pub mod trace;
pub mod util;

pub use extraction::{BestEffort, Degradation, ExtractionResult};
pub use format::{DetectedFormat, FormatFamily, FormatParseError};
pub use trace::{LogTrace, Probe, ProbeKind, ProbeTrace, RecordingTrace, SilentTrace};

/// Trait for recovering progress numbers from one generation's save layout.
///
/// Implementors probe a fixed set of candidate offsets for badge and dex
/// bitfields and a playtime counter. Extraction never fails: offsets that
/// fall outside the buffer are skipped and the affected field stays zero,
/// which is reported as a [`Degradation`].
pub trait GenerationExtractor: Send + Sync {
    /// Extract progress numbers from raw save bytes.
    ///
    /// # Arguments
    /// * `data` - The complete save blob
    /// * `trace` - Sink observing every probe (use [`SilentTrace`] to ignore)
    fn extract(&self, data: &[u8], trace: &dyn ProbeTrace) -> BestEffort<ExtractionResult>;

    /// The format this extractor handles.
    fn format(&self) -> DetectedFormat;

    /// Result used when extraction fails unexpectedly.
    fn fallback(&self) -> ExtractionResult;

    /// Highest plausible badge count for this generation.
    fn badge_cap(&self) -> u8;

    /// Size of the species roster the dex percentage is measured against.
    fn species_total(&self) -> u32;
}
