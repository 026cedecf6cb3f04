//! The natural-breaks threshold engine.
//!
//! Turns a numeric sample and a class count into human-presentable class
//! boundaries in four steps:
//!
//! 1. Cluster the sample with [`ckmeans`] into `class_count` optimal groups.
//! 2. Measure the gap between each pair of adjacent clusters.
//! 3. Place a raw threshold at the midpoint of each gap.
//! 4. Round each raw threshold half-up to the power-of-ten grid sized by
//!    its own gap, so a boundary reads like 15 rather than 14.73.
//!
//! The computation is a pure function of its inputs: no state is retained
//! across calls and the caller's sample is never mutated.

use crate::ckmeans::ckmeans;
use crate::error::BreaksError;
use crate::trace::TraceSink;

// =============================================================================
// NaturalBreaks
// =============================================================================

/// Threshold engine configuration.
///
/// Holds the desired number of classes (typically the size of the caller's
/// color palette). A `class_count` of `n` yields `n - 1` thresholds, which
/// bucket values into `n` classes via a step function such as
/// [`ThresholdScale`](crate::scale::ThresholdScale).
///
/// # Example
///
/// ```
/// use natural_breaks::NaturalBreaks;
///
/// let breaks = NaturalBreaks::new(2);
/// let thresholds = breaks.thresholds(&[2.0, 3.0, 4.0, 20.0, 21.0, 22.0])?;
/// assert_eq!(thresholds, vec![10.0]);
/// # Ok::<(), natural_breaks::BreaksError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalBreaks {
    class_count: usize,
}

impl NaturalBreaks {
    /// Create an engine producing `class_count` classes.
    ///
    /// The count is validated on computation, not construction, so a
    /// configuration built from untrusted input can be carried around
    /// freely.
    pub fn new(class_count: usize) -> Self {
        Self { class_count }
    }

    /// The configured number of classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Compute `class_count - 1` ascending thresholds for `sample`.
    ///
    /// A `class_count` of 1 returns an empty vector: one class needs no
    /// boundaries. Duplicate boundary values between clusters (a zero gap)
    /// do not fault; the rounding precision falls back to integers and the
    /// threshold lands on the shared boundary value.
    ///
    /// # Errors
    ///
    /// Returns [`BreaksError`] for an empty sample, a zero class count, a
    /// class count exceeding the sample length, or non-finite sample
    /// values.
    pub fn thresholds(&self, sample: &[f64]) -> Result<Vec<f64>, BreaksError> {
        self.compute(sample, None)
    }

    /// Like [`thresholds`](Self::thresholds), reporting every intermediate
    /// stage to `sink`. The sink never affects the result.
    pub fn thresholds_traced(
        &self,
        sample: &[f64],
        sink: &mut dyn TraceSink,
    ) -> Result<Vec<f64>, BreaksError> {
        self.compute(sample, Some(sink))
    }

    fn compute(
        &self,
        sample: &[f64],
        mut trace: Option<&mut dyn TraceSink>,
    ) -> Result<Vec<f64>, BreaksError> {
        let partition = ckmeans(sample, self.class_count)?;
        if let Some(sink) = trace.as_deref_mut() {
            sink.clusters(&partition);
        }

        let n_gaps = self.class_count - 1;
        let mut gaps = Vec::with_capacity(n_gaps);
        for i in 0..n_gaps {
            gaps.push(partition.cluster_min(i + 1) - partition.cluster_max(i));
        }
        if let Some(sink) = trace.as_deref_mut() {
            sink.gaps(&gaps);
        }

        let precisions: Vec<f64> = gaps.iter().map(|&g| precision_for_gap(g)).collect();
        if let Some(sink) = trace.as_deref_mut() {
            sink.precisions(&precisions);
        }

        let raw: Vec<f64> = gaps
            .iter()
            .enumerate()
            .map(|(i, &g)| partition.cluster_max(i) + g / 2.0)
            .collect();
        if let Some(sink) = trace.as_deref_mut() {
            sink.raw_thresholds(&raw);
        }

        let rounded: Vec<f64> = raw
            .iter()
            .zip(&precisions)
            .map(|(&x, &p)| round_to_precision(x, p))
            .collect();
        if let Some(sink) = trace.as_deref_mut() {
            sink.rounded_thresholds(&rounded);
        }

        Ok(rounded)
    }
}

/// Compute natural-breaks thresholds for `sample` with `class_count`
/// classes.
///
/// Convenience wrapper around [`NaturalBreaks`] for one-off calls.
///
/// # Errors
///
/// See [`NaturalBreaks::thresholds`].
pub fn natural_thresholds(sample: &[f64], class_count: usize) -> Result<Vec<f64>, BreaksError> {
    NaturalBreaks::new(class_count).thresholds(sample)
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounding precision for a gap: the power of ten at the gap's order of
/// magnitude, e.g. 16 → 10, 4 → 1, 0.36 → 0.1.
///
/// A zero gap (duplicate boundary values) has no defined magnitude, and a
/// subnormal gap can underflow the power to zero; both fall back to
/// integer precision so rounding stays finite.
fn precision_for_gap(gap: f64) -> f64 {
    if gap > 0.0 {
        let precision = 10f64.powi(gap.log10().floor() as i32);
        if precision.is_finite() && precision > 0.0 {
            return precision;
        }
    }
    1.0
}

/// Round `x` half-up to the nearest multiple of `precision`.
///
/// Matches IEEE fmod arithmetic: `y = x + precision / 2`, result
/// `y - (y % precision)`.
fn round_to_precision(x: f64, precision: f64) -> f64 {
    let y = x + precision / 2.0;
    y - y % precision
}

// =============================================================================
// Tests
// =============================================================================
