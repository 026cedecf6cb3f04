//! Diagnostic tracing of intermediate threshold stages.
//!
//! The engine can report each pipeline stage (clusters, gaps, raw and
//! rounded thresholds) to an observer. Tracing is opt-in and purely
//! observational: the computed thresholds are identical with or without a
//! sink attached.

use crate::ckmeans::ClusterPartition;

// =============================================================================
// TraceSink
// =============================================================================

/// Observer for the intermediate stages of a threshold computation.
///
/// All methods default to no-ops, so an implementation only overrides the
/// stages it cares about. Stages fire in pipeline order, once per
/// invocation.
pub trait TraceSink {
    /// The optimal cluster partition of the sample.
    fn clusters(&mut self, _partition: &ClusterPartition) {}

    /// Gaps between adjacent clusters, one per threshold.
    fn gaps(&mut self, _gaps: &[f64]) {}

    /// Rounding precision chosen for each gap (a power of ten, or the
    /// integer fallback for degenerate gaps).
    fn precisions(&mut self, _precisions: &[f64]) {}

    /// Midpoint thresholds before rounding.
    fn raw_thresholds(&mut self, _raw: &[f64]) {}

    /// Final thresholds after rounding.
    fn rounded_thresholds(&mut self, _rounded: &[f64]) {}
}

// =============================================================================
// RecordedTrace
// =============================================================================

/// A [`TraceSink`] that stores every stage for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordedTrace {
    /// Per-cluster value slices, in ascending order.
    pub clusters: Vec<Vec<f64>>,
    /// Gaps between adjacent clusters.
    pub gaps: Vec<f64>,
    /// Rounding precision per gap.
    pub precisions: Vec<f64>,
    /// Unrounded midpoint thresholds.
    pub raw_thresholds: Vec<f64>,
    /// Final rounded thresholds.
    pub rounded_thresholds: Vec<f64>,
}

impl TraceSink for RecordedTrace {
    fn clusters(&mut self, partition: &ClusterPartition) {
        self.clusters = partition.iter().map(<[f64]>::to_vec).collect();
    }

    fn gaps(&mut self, gaps: &[f64]) {
        self.gaps = gaps.to_vec();
    }

    fn precisions(&mut self, precisions: &[f64]) {
        self.precisions = precisions.to_vec();
    }

    fn raw_thresholds(&mut self, raw: &[f64]) {
        self.raw_thresholds = raw.to_vec();
    }

    fn rounded_thresholds(&mut self, rounded: &[f64]) {
        self.rounded_thresholds = rounded.to_vec();
    }
}
