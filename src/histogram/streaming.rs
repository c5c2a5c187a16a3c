//! Streaming histogram with optional exponential decay
//!
//! Implementation of the Ben-Haim/Tom-Tov streaming histogram: a fixed
//! budget of `(value, count)` bins kept sorted by value. Each sample lands in
//! its own bin (or bumps an existing bin with the same value), and whenever
//! the budget is exceeded the two bins with the smallest value gap are
//! collapsed at their weighted mean. Resolution therefore follows the data
//! density rather than fixed bucket boundaries.
//!
//! The decayed variant additionally multiplies the mass of every untouched
//! bin by `alpha` on each insertion, so older observations fade and the
//! summary tracks recent data.
//!
//! # Thread Safety
//!
//! `Histogram` has no interior synchronization. Serialize concurrent writers
//! (and readers racing a writer) externally, e.g. `Arc<Mutex<Histogram>>`.

use super::bins::{truncate_mass, Bin, BinStore};
use super::stats;
use crate::math;
use crate::traits::{MergeError, QuantileSketch, Sketch};
use tracing::debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

/// Value returned by [`Histogram::quantile_or_sentinel`] when no bin
/// satisfies the requested rank.
pub const NO_QUANTILE: f64 = -1.0;

/// Bounded-memory streaming histogram
///
/// Holds at most `max_bins` weighted points, from which approximate
/// quantiles, CDF values, mean, variance and modes are read in
/// O(`max_bins`) time. Somewhere between 20 and 80 bins is usually enough.
///
/// # Variants
///
/// - [`Histogram::new`]: plain histogram, every sample keeps its full mass
///   and [`count`](Sketch::count) is the number of samples added.
/// - [`Histogram::with_decay`] / [`Histogram::with_window`]: recency-weighted
///   histogram. `count` becomes a decayed, approximate sample count.
///
/// # Example
///
/// ```
/// use streamhist::prelude::*;
///
/// let mut hist = Histogram::new(20);
///
/// for i in 0..100 {
///     hist.add(i as f64);
/// }
///
/// assert_eq!(hist.bins_count(), 20);
/// assert_eq!(hist.count(), 100);
/// assert!((hist.mean() - 49.5).abs() < 1e-9);
///
/// let p50 = hist.median().unwrap();
/// assert!(p50 > 40.0 && p50 < 60.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// Sorted bins and their capacity
    store: BinStore,
    /// Truncated sum of bin counts, refreshed after every mutation
    total: u64,
    /// Decay factor in `(0, 1]`; `1.0` disables decay
    alpha: f64,
}

impl Histogram {
    /// Create a plain (non-decaying) histogram with at most `max_bins` bins
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero.
    pub fn new(max_bins: usize) -> Self {
        Self::with_decay(max_bins, 1.0)
    }

    /// Create a decaying histogram
    ///
    /// Every insertion scales the mass of all other bins by `alpha`.
    /// `alpha = 1.0` is equivalent to [`Histogram::new`].
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero or `alpha` is not in `(0, 1]`.
    pub fn with_decay(max_bins: usize, alpha: f64) -> Self {
        assert!(max_bins > 0, "max_bins must be at least 1");
        assert!(
            alpha.is_finite() && alpha > 0.0 && alpha <= 1.0,
            "alpha must be in (0, 1], got {}",
            alpha
        );

        Self {
            store: BinStore::new(max_bins),
            total: 0,
            alpha,
        }
    }

    /// Create a decaying histogram whose mass has an average age of roughly
    /// `window` insertions.
    ///
    /// Uses `alpha = 1 - 2 / (window + 1)`; a 60 sample window gives
    /// `alpha ≈ 0.967`.
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero or `window < 2`.
    pub fn with_window(max_bins: usize, window: u32) -> Self {
        assert!(window >= 2, "window must be at least 2, got {}", window);
        Self::with_decay(max_bins, 1.0 - 2.0 / (window as f64 + 1.0))
    }

    /// Assemble a histogram from validated parts. No merge or decay runs.
    pub(crate) fn from_parts(store: BinStore, total: u64, alpha: f64) -> Self {
        Self {
            store,
            total,
            alpha,
        }
    }

    /// Maximum number of bins
    pub fn max_bins(&self) -> usize {
        self.store.max_bins()
    }

    /// Decay factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether insertions decay existing mass
    pub fn is_decayed(&self) -> bool {
        self.alpha < 1.0
    }

    /// Bins in ascending value order
    pub fn bins(&self) -> &[Bin] {
        self.store.as_slice()
    }

    /// Current number of bins
    pub fn bins_count(&self) -> usize {
        self.store.len()
    }

    /// Bin at position `index`, or a zero bin when out of range
    pub fn bin(&self, index: usize) -> Bin {
        self.store.as_slice().get(index).copied().unwrap_or_default()
    }

    /// Add a single sample (internal)
    ///
    /// NaN and infinite values are ignored; they have no meaningful
    /// position among the bins.
    fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }

        let touched = self.store.insert(value, 1.0);
        if self.is_decayed() {
            self.store.scale_down(touched, self.alpha);
        }
        self.store.trim();
        self.refresh_total();
    }

    fn refresh_total(&mut self) {
        self.total = truncate_mass(self.store.mass());
    }

    /// Quantile with the sentinel convention: [`NO_QUANTILE`] (`-1.0`) when
    /// no bin satisfies `q`.
    ///
    /// The sentinel is indistinguishable from a genuine `-1.0` sample; prefer
    /// [`QuantileSketch::quantile`] unless a plain `f64` is required.
    pub fn quantile_or_sentinel(&self, q: f64) -> f64 {
        stats::quantile(self.bins(), self.total, q).unwrap_or(NO_QUANTILE)
    }

    /// Mass-weighted mean of the bin values, `0.0` when empty
    pub fn mean(&self) -> f64 {
        stats::mean(self.bins(), self.total)
    }

    /// Mass-weighted variance of the bin values, `0.0` when empty
    pub fn variance(&self) -> f64 {
        stats::variance(self.bins(), self.total)
    }

    /// Standard deviation, the square root of [`variance`](Self::variance)
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Values of the `n` heaviest bins, heaviest first
    ///
    /// Returns an empty vector when the histogram is empty.
    pub fn modes(&self, n: usize) -> Vec<f64> {
        stats::modes(self.bins(), self.total, n)
    }
}

impl Sketch for Histogram {
    type Item = f64;

    fn update(&mut self, item: &f64) {
        self.push(*item);
    }

    /// Fold every bin of `other` into this histogram.
    ///
    /// Mass is added without decay and the bin budget of `self` is restored
    /// after each bin. Both histograms must share the same `alpha`.
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        let avg = (self.alpha + other.alpha) * 0.5;
        let diff = self.alpha - other.alpha;
        let abs_diff = if diff < 0.0 { -diff } else { diff };
        if abs_diff / avg > 1e-6 {
            debug!(
                expected = self.alpha,
                found = other.alpha,
                "refusing to merge histograms with different decay"
            );
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("alpha={}", self.alpha),
                found: fmt!("alpha={}", other.alpha),
            });
        }

        for bin in other.bins() {
            self.store.insert(bin.value, bin.count);
            self.store.trim();
        }
        self.refresh_total();

        Ok(())
    }

    fn clear(&mut self) {
        self.store.clear();
        self.total = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.store.capacity() * core::mem::size_of::<Bin>()
    }

    /// Truncated total mass. For the decayed variant this is an approximate,
    /// decayed sample count.
    fn count(&self) -> u64 {
        self.total
    }
}

impl QuantileSketch for Histogram {
    type Value = f64;

    fn add(&mut self, value: f64) {
        self.push(value);
    }

    /// Value of the first bin at which the cumulative mass reaches
    /// `rank * count()`.
    ///
    /// `None` when the histogram is empty or `rank` is beyond what the bins
    /// can satisfy.
    fn quantile(&self, rank: f64) -> Option<f64> {
        stats::quantile(self.bins(), self.total, rank)
    }

    /// Fraction of mass in bins with value `<= value`.
    ///
    /// The denominator is `count()`, unguarded: on an empty histogram the
    /// result is NaN. Check [`Sketch::is_empty`] first.
    fn rank(&self, value: &f64) -> f64 {
        stats::cdf(self.bins(), self.total, *value)
    }

    /// Value of the lowest bin. Merged bins sit at their weighted mean, so
    /// this is not necessarily the smallest sample seen.
    fn min(&self) -> Option<f64> {
        self.bins().first().map(|bin| bin.value)
    }

    /// Value of the highest bin, see [`min`](QuantileSketch::min).
    fn max(&self) -> Option<f64> {
        self.bins().last().map(|bin| bin.value)
    }
}

// ============================================================================
// Tests
// ============================================================================
