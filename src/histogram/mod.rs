//! Streaming histograms
//!
//! This module provides a bounded-memory histogram that summarizes an
//! unbounded stream of `f64` samples in at most `max_bins` weighted points.
//!
//! # Algorithms
//!
//! - [`Histogram`]: Ben-Haim/Tom-Tov closest-pair merging, optionally with
//!   exponential decay of older mass
//!
//! # Example
//!
//! ```
//! use streamhist::histogram::Histogram;
//! use streamhist::traits::{QuantileSketch, Sketch};
//!
//! // Recent samples dominate: untouched bins lose 10% per insertion.
//! let mut hist = Histogram::with_decay(40, 0.9);
//!
//! for latency_ms in [12.0, 15.0, 11.0, 250.0, 14.0, 13.0] {
//!     hist.add(latency_ms);
//! }
//!
//! let p50 = hist.median();
//! println!("p50: {:?}, decayed count: {}", p50, hist.count());
//! ```

mod bins;
mod render;
mod state;
mod stats;
mod streaming;

pub use bins::Bin;
pub use state::HistogramState;
pub use streaming::{Histogram, NO_QUANTILE};
