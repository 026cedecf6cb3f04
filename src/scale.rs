//! Step-function classification over an ordered threshold sequence.

// =============================================================================
// ThresholdScale
// =============================================================================

/// Buckets continuous values into discrete classes by threshold.
///
/// A scale over `n - 1` ascending thresholds maps a value to one of `n`
/// classes: values below the first threshold land in class 0, values at or
/// above the last land in class `n - 1`. A value equal to a threshold
/// belongs to the class above it (bisect-right semantics), so the class of
/// `v` is the number of thresholds `<= v`.
///
/// Typically built from [`NaturalBreaks`](crate::NaturalBreaks) output and
/// indexed into a color palette of matching size.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    thresholds: Vec<f64>,
}

impl ThresholdScale {
    /// Create a scale from ascending thresholds.
    ///
    /// An empty sequence is valid and maps every value to class 0.
    pub fn new(thresholds: Vec<f64>) -> Self {
        debug_assert!(
            thresholds.windows(2).all(|w| w[0] <= w[1]),
            "thresholds must be non-decreasing"
        );
        Self { thresholds }
    }

    /// The threshold sequence.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of classes this scale distinguishes.
    pub fn n_classes(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Class index of `value`, in `0..self.n_classes()`.
    pub fn class_of(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }
}

// =============================================================================
// Tests
// =============================================================================
