//! Import and export of histogram state
//!
//! [`HistogramState`] is the plain record a [`Histogram`] is exported to and
//! rebuilt from. Export copies the bins verbatim; import validates the whole
//! record before building anything and never runs merge or decay.
//!
//! With the `serde` feature the record (and `Histogram` itself, through the
//! record) serializes with PascalCase field names:
//!
//! ```text
//! {"Bins":[{"Value":1.0,"Count":2.0}],"MaxBins":20,"Total":2,"Alpha":1.0}
//! ```
//!
//! Decayed counts and merged values are arbitrary `f64`s, so an exact round
//! trip needs a codec that parses floats losslessly. With `serde_json` that
//! means enabling its `float_roundtrip` feature; the default fast parser can
//! land one ULP off, which changes bins and can trip the `Total` check.

use super::bins::{truncate_mass, Bin, BinStore};
use super::streaming::Histogram;
use crate::traits::{ImportError, Sketch};
use tracing::debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Exported histogram state
///
/// Import checks `Total` against the truncated sum of the counts, so the
/// counts must come back bit-for-bit. Serialize through a lossless float
/// format (for `serde_json`, the `float_roundtrip` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct HistogramState {
    /// Bins in ascending value order
    pub bins: Vec<Bin>,
    /// Bin capacity
    pub max_bins: usize,
    /// Truncated sum of the bin counts
    pub total: u64,
    /// Decay factor, `1.0` for a plain histogram
    pub alpha: f64,
}

impl HistogramState {
    /// Check every structural invariant of a histogram.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.max_bins == 0 {
            return Err(ImportError::ZeroCapacity);
        }
        if self.bins.len() > self.max_bins {
            return Err(ImportError::TooManyBins {
                max_bins: self.max_bins,
                found: self.bins.len(),
            });
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ImportError::InvalidAlpha(self.alpha));
        }

        for (index, bin) in self.bins.iter().enumerate() {
            if !bin.value.is_finite() {
                return Err(ImportError::NonFiniteValue {
                    index,
                    value: bin.value,
                });
            }
            if !(bin.count.is_finite() && bin.count >= 0.0) {
                return Err(ImportError::InvalidCount {
                    index,
                    count: bin.count,
                });
            }
            if index > 0 && self.bins[index - 1].value >= bin.value {
                return Err(ImportError::Unsorted { index });
            }
        }

        let mass: f64 = self.bins.iter().map(|bin| bin.count).sum();
        let expected = truncate_mass(mass);
        if expected != self.total {
            return Err(ImportError::TotalMismatch {
                expected,
                found: self.total,
            });
        }

        Ok(())
    }
}

impl Histogram {
    /// Export the current state
    pub fn to_state(&self) -> HistogramState {
        HistogramState {
            bins: self.bins().to_vec(),
            max_bins: self.max_bins(),
            total: self.count(),
            alpha: self.alpha(),
        }
    }

    /// Rebuild a histogram from an exported state
    pub fn from_state(state: HistogramState) -> Result<Self, ImportError> {
        if let Err(e) = state.validate() {
            debug!(error = %e, "rejected histogram state");
            return Err(e);
        }

        let HistogramState {
            bins,
            max_bins,
            total,
            alpha,
        } = state;
        Ok(Histogram::from_parts(
            BinStore::from_sorted(bins, max_bins),
            total,
            alpha,
        ))
    }

    /// Replace this histogram with an exported state.
    ///
    /// On error `self` is left untouched.
    pub fn import(&mut self, state: HistogramState) -> Result<(), ImportError> {
        *self = Self::from_state(state)?;
        Ok(())
    }
}

impl From<&Histogram> for HistogramState {
    fn from(hist: &Histogram) -> Self {
        hist.to_state()
    }
}

impl TryFrom<HistogramState> for Histogram {
    type Error = ImportError;

    fn try_from(state: HistogramState) -> Result<Self, Self::Error> {
        Histogram::from_state(state)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Histogram {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_state(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Histogram {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let state = <HistogramState as serde::Deserialize>::deserialize(deserializer)?;
        Histogram::from_state(state).map_err(D::Error::custom)
    }
}
