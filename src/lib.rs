//! natural-breaks: class boundaries for data classification.
//!
//! Computes "natural" class-boundary thresholds for a numeric sample, the
//! way a cartographer would pick the color bands of a choropleth map:
//! cluster the values into their natural groupings, put a boundary in the
//! middle of each gap between groups, and round it to a number a human
//! would have chosen.
//!
//! # Key Types
//!
//! - [`NaturalBreaks`] / [`natural_thresholds`] - The threshold engine
//! - [`ckmeans`] / [`ClusterPartition`] - Optimal 1-D clustering
//! - [`ThresholdScale`] - Step-function bucketing of values into classes
//! - [`TraceSink`] - Optional observer for intermediate stages
//!
//! # Example
//!
//! ```
//! use natural_breaks::{natural_thresholds, ThresholdScale};
//!
//! // One threshold per boundary between five color bands.
//! let rates = [23.0, 20.0, 16.0, 14.0, 12.0, 11.0, 9.0, 8.0, 6.0];
//! let thresholds = natural_thresholds(&rates, 5)?;
//! assert_eq!(thresholds.len(), 4);
//!
//! let scale = ThresholdScale::new(thresholds);
//! assert!(scale.class_of(23.0) > scale.class_of(6.0));
//! # Ok::<(), natural_breaks::BreaksError>(())
//! ```
//!
//! Every computation is a pure, deterministic function of the sample
//! multiset and the class count: no seeding, no retained state, safe to
//! call concurrently from independent chart builders.

// Re-export approx traits for callers who want to compare thresholds
pub use approx;

pub mod ckmeans;
pub mod error;
pub mod scale;
pub mod thresholds;
pub mod trace;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use ckmeans::{ckmeans, ClusterPartition};
pub use error::BreaksError;
pub use scale::ThresholdScale;
pub use thresholds::{natural_thresholds, NaturalBreaks};
pub use trace::{RecordedTrace, TraceSink};
