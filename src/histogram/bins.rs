//! Sorted bin storage and the insert / merge / decay engine
//!
//! Bins are kept ascending by value with at most one bin per distinct value.
//! Every public histogram operation leaves at most `max_bins` of them behind.

use core::cmp::Ordering;
use tracing::trace;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A bin in the histogram
///
/// A bin stands in for a cluster of observed samples: `value` is their
/// mass-weighted mean and `count` the mass they carry. Counts are real
/// numbers because decay and merging produce fractional mass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct Bin {
    /// Representative position of the bin
    pub value: f64,
    /// Accumulated mass of the bin
    pub count: f64,
}

impl Bin {
    /// Create a new bin
    pub fn new(value: f64, count: f64) -> Self {
        Self { value, count }
    }

    /// Collapse two value-adjacent bins into one.
    ///
    /// Pairs carrying at most one unit of mass are merged at their midpoint,
    /// heavier pairs at their mass-weighted mean.
    fn merged(lo: &Bin, hi: &Bin) -> Bin {
        let count = lo.count + hi.count;
        let mut value = if count <= 1.0 {
            (lo.value + hi.value) / 2.0
        } else {
            (lo.value * lo.count + hi.value * hi.count) / count
        };

        if !value.is_finite() {
            // products overflowed near the edge of the f64 range
            value = lo.value / 2.0 + hi.value / 2.0;
        }

        // The merged value must stay inside the pair to keep neighbours ordered.
        Bin {
            value: value.clamp(lo.value, hi.value),
            count,
        }
    }
}

/// Value-sorted bin buffer with a fixed capacity
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BinStore {
    bins: Vec<Bin>,
    max_bins: usize,
}

impl BinStore {
    /// Create an empty store. Room for one extra bin is reserved up front so
    /// the insert-then-trim cycle never reallocates.
    pub(crate) fn new(max_bins: usize) -> Self {
        Self {
            bins: Vec::with_capacity(max_bins + 1),
            max_bins,
        }
    }

    /// Wrap bins that are already known to be sorted, distinct and within
    /// capacity.
    pub(crate) fn from_sorted(mut bins: Vec<Bin>, max_bins: usize) -> Self {
        bins.reserve((max_bins + 1).saturating_sub(bins.len()));
        Self { bins, max_bins }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[Bin] {
        &self.bins
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub(crate) fn max_bins(&self) -> usize {
        self.max_bins
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.bins.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.bins.clear();
    }

    /// Locate `value`: `Ok` with the index of the bin holding exactly that
    /// value, or `Err` with the position that keeps the store sorted.
    fn find(&self, value: f64) -> Result<usize, usize> {
        // Stored values and probes are always finite, so partial_cmp is total
        // here and treats -0.0 and 0.0 as the same position.
        self.bins
            .binary_search_by(|bin| bin.value.partial_cmp(&value).unwrap_or(Ordering::Less))
    }

    /// Add `count` units of mass at `value`, returning the index of the bin
    /// that received it.
    ///
    /// An existing bin with an equal value absorbs the mass; otherwise a new
    /// bin is inserted before the first bin with a greater value, or appended
    /// when there is none.
    pub(crate) fn insert(&mut self, value: f64, count: f64) -> usize {
        match self.find(value) {
            Ok(index) => {
                self.bins[index].count += count;
                index
            }
            Err(index) => {
                self.bins.insert(index, Bin::new(value, count));
                index
            }
        }
    }

    /// Decay every bin except `except` by the factor `alpha`.
    ///
    /// This is an EWMA towards zero: `0 * (1 - alpha) + count * alpha`.
    pub(crate) fn scale_down(&mut self, except: usize, alpha: f64) {
        for (i, bin) in self.bins.iter_mut().enumerate() {
            if i != except {
                bin.count *= alpha;
            }
        }
    }

    /// Merge closest neighbours until the store is back within capacity.
    pub(crate) fn trim(&mut self) {
        while self.bins.len() > self.max_bins {
            let index = self.closest_pair();
            self.merge_adjacent(index);
        }
    }

    /// Index `i` of the adjacent pair `(i - 1, i)` with the smallest value
    /// gap. The lowest index wins ties.
    fn closest_pair(&self) -> usize {
        let mut best = 1;
        let mut best_gap = f64::INFINITY;
        for i in 1..self.bins.len() {
            let gap = self.bins[i].value - self.bins[i - 1].value;
            if gap < best_gap {
                best_gap = gap;
                best = i;
            }
        }
        best
    }

    /// Replace the pair `(index - 1, index)` with its merged bin.
    fn merge_adjacent(&mut self, index: usize) {
        let merged = Bin::merged(&self.bins[index - 1], &self.bins[index]);
        trace!(
            lo = self.bins[index - 1].value,
            hi = self.bins[index].value,
            value = merged.value,
            count = merged.count,
            "merged adjacent bins"
        );
        self.bins[index - 1] = merged;
        self.bins.remove(index);
    }

    /// Sum of all bin counts.
    pub(crate) fn mass(&self) -> f64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// Truncate a summed mass to the cached integer total.
#[inline]
pub(crate) fn truncate_mass(mass: f64) -> u64 {
    // `as` saturates and maps NaN to zero.
    mass as u64
}
