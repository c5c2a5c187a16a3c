//! Core traits for streaming histograms
//!
//! Histograms implement the base [`Sketch`] trait plus [`QuantileSketch`]
//! for rank and percentile queries. The error types shared by the merge and
//! import paths live here as well.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Error during sketch merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Sketches have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Error raised when an exported histogram state is rejected on import
///
/// Import is atomic: when one of these is returned the target histogram has
/// not been modified.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// `max_bins` must be at least one
    ZeroCapacity,
    /// More bins than the declared capacity
    TooManyBins { max_bins: usize, found: usize },
    /// A bin value is NaN or infinite
    NonFiniteValue { index: usize, value: f64 },
    /// Bin values are not strictly ascending
    Unsorted { index: usize },
    /// A bin count is negative or not finite
    InvalidCount { index: usize, count: f64 },
    /// Decay factor outside `(0, 1]`
    InvalidAlpha(f64),
    /// Cached total disagrees with the bin counts
    TotalMismatch { expected: u64, found: u64 },
}

impl core::fmt::Display for ImportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImportError::ZeroCapacity => write!(f, "max bins must be at least 1"),
            ImportError::TooManyBins { max_bins, found } => {
                write!(f, "too many bins: capacity {}, found {}", max_bins, found)
            }
            ImportError::NonFiniteValue { index, value } => {
                write!(f, "bin {} has non-finite value {}", index, value)
            }
            ImportError::Unsorted { index } => {
                write!(f, "bin {} is not strictly greater than its predecessor", index)
            }
            ImportError::InvalidCount { index, count } => {
                write!(f, "bin {} has invalid count {}", index, count)
            }
            ImportError::InvalidAlpha(alpha) => {
                write!(f, "alpha must be in (0, 1], got {}", alpha)
            }
            ImportError::TotalMismatch { expected, found } => {
                write!(f, "total mismatch: bins sum to {}, record says {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ImportError {}

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Quantile estimation sketches
pub trait QuantileSketch: Sketch {
    /// The value type being tracked
    type Value: PartialOrd + Clone;

    /// Add a value to the sketch
    fn add(&mut self, value: Self::Value);

    /// Get quantile value at given rank (0.0 to 1.0)
    ///
    /// rank=0.5 returns the median
    fn quantile(&self, rank: f64) -> Option<Self::Value>;

    /// Get rank of a value (0.0 to 1.0)
    fn rank(&self, value: &Self::Value) -> f64;

    /// Get CDF value at given point
    fn cdf(&self, value: &Self::Value) -> f64 {
        self.rank(value)
    }

    /// Get minimum value seen
    fn min(&self) -> Option<Self::Value>;

    /// Get maximum value seen
    fn max(&self) -> Option<Self::Value>;

    /// Get median (50th percentile)
    fn median(&self) -> Option<Self::Value> {
        self.quantile(0.5)
    }

    /// Get multiple quantiles at once
    fn quantiles(&self, ranks: &[f64]) -> Vec<Option<Self::Value>> {
        ranks.iter().map(|&r| self.quantile(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display() {
        let err = ImportError::TooManyBins {
            max_bins: 4,
            found: 9,
        };
        assert_eq!(err.to_string(), "too many bins: capacity 4, found 9");

        let err = ImportError::InvalidAlpha(1.5);
        assert_eq!(err.to_string(), "alpha must be in (0, 1], got 1.5");
    }

    #[test]
    fn test_merge_error_display() {
        let err = MergeError::IncompatibleConfig {
            expected: "alpha=0.5".into(),
            found: "alpha=0.9".into(),
        };
        assert_eq!(
            err.to_string(),
            "incompatible config: expected alpha=0.5, found alpha=0.9"
        );
    }
}
