//! Error types for clustering and threshold computation.

// =============================================================================
// BreaksError
// =============================================================================

/// Input validation error for clustering and threshold computation.
///
/// The engine surfaces invalid input immediately rather than coercing it;
/// the only handled degeneracy is a zero gap between adjacent clusters,
/// which is not an error (see [`crate::thresholds`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BreaksError {
    /// The sample contains no values.
    #[error("sample must not be empty")]
    EmptySample,

    /// Fewer than one class was requested.
    #[error("class count must be >= 1, got {0}")]
    InvalidClassCount(usize),

    /// More clusters were requested than there are sample values, so at
    /// least one cluster would be empty.
    #[error("class count {class_count} exceeds sample length {sample_len}")]
    TooManyClasses {
        /// Requested number of classes.
        class_count: usize,
        /// Number of values in the sample.
        sample_len: usize,
    },

    /// The sample contains a NaN or infinite value.
    #[error("sample value at index {index} is not finite")]
    NonFiniteSample {
        /// Position of the offending value in the caller's sample.
        index: usize,
    },
}

// =============================================================================
// Tests
// =============================================================================
