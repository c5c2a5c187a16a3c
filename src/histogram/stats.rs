//! Read-only statistics over a sorted bin slice
//!
//! All queries are a single pass over the bins (plus a sort for modes) and
//! use the cached integer `total` as their denominator.

use super::bins::Bin;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Reverse-cumulative-mass lookup: the value of the first bin at which the
/// running mass reaches `q * total`.
///
/// Returns `None` when no bin gets there (empty histogram, NaN rank, or a
/// rank above one).
pub(crate) fn quantile(bins: &[Bin], total: u64, q: f64) -> Option<f64> {
    let mut remaining = q * total as f64;
    for bin in bins {
        remaining -= bin.count;
        if remaining <= 0.0 {
            return Some(bin.value);
        }
    }
    None
}

/// Fraction of the mass at or below `x`. Divides by `total` unguarded, so an
/// empty histogram yields NaN.
pub(crate) fn cdf(bins: &[Bin], total: u64, x: f64) -> f64 {
    let below: f64 = bins
        .iter()
        .take_while(|bin| bin.value <= x)
        .map(|bin| bin.count)
        .sum();
    below / total as f64
}

pub(crate) fn mean(bins: &[Bin], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let sum: f64 = bins.iter().map(|bin| bin.value * bin.count).sum();
    sum / total as f64
}

/// Mass-weighted second central moment.
pub(crate) fn variance(bins: &[Bin], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mean = mean(bins, total);
    let sum: f64 = bins
        .iter()
        .map(|bin| {
            let delta = bin.value - mean;
            bin.count * delta * delta
        })
        .sum();
    sum / total as f64
}

/// Values of the `n` heaviest bins, heaviest first. Bins with equal counts
/// keep their value order.
pub(crate) fn modes(bins: &[Bin], total: u64, n: usize) -> Vec<f64> {
    if total == 0 {
        return Vec::new();
    }
    let mut sorted: Vec<Bin> = bins.to_vec();
    sorted.sort_by(|a, b| b.count.total_cmp(&a.count));
    sorted.into_iter().take(n).map(|bin| bin.value).collect()
}
