//! Size-based save format classification.
//!
//! Save files carry no reliable magic bytes, so the generation is guessed
//! from length alone. Each canonical size accepts lengths within 5 % of it to
//! absorb emulator headers and footers. Anything else is assigned to the
//! nearest canonical size so extraction is always attempted.

use dextrack_core::{BestEffort, Degradation, DetectedFormat};

/// Fractional tolerance around each canonical size.
pub const SIZE_TOLERANCE: f64 = 0.05;

/// Classifies save blobs by length.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatClassifier;

impl FormatClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a blob length.
    ///
    /// Always yields one of the four classifiable formats. A
    /// [`Degradation::ClassifiedByNearestSize`] is attached when no tolerance
    /// band matched.
    pub fn classify(&self, len: usize) -> BestEffort<DetectedFormat> {
        if let Some(format) = within_tolerance(len) {
            return BestEffort::clean(format);
        }

        let chosen = nearest(len);
        log::debug!(
            "{} bytes outside every tolerance band, using nearest size {}",
            len,
            chosen
        );
        BestEffort::degraded(
            chosen,
            vec![Degradation::ClassifiedByNearestSize { len, chosen }],
        )
    }
}

/// First format, smallest first, whose tolerance band contains `len`.
fn within_tolerance(len: usize) -> Option<DetectedFormat> {
    DetectedFormat::classifiable().iter().copied().find(|f| {
        f.canonical_size().is_some_and(|size| {
            let diff = len.abs_diff(size) as f64;
            diff <= size as f64 * SIZE_TOLERANCE
        })
    })
}

/// Format with the smallest absolute size difference. Ties keep the smaller size.
fn nearest(len: usize) -> DetectedFormat {
    let mut best = DetectedFormat::GameBoy8K;
    let mut best_diff = usize::MAX;
    for &format in DetectedFormat::classifiable() {
        if let Some(size) = format.canonical_size() {
            let diff = len.abs_diff(size);
            if diff < best_diff {
                best = format;
                best_diff = diff;
            }
        }
    }
    best
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
