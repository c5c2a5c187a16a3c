//! # Streamhist
//!
//! Bounded-memory streaming histograms for Rust.
//!
//! A [`Histogram`] ingests an unbounded sequence of real-valued samples and
//! keeps a fixed-size summary of at most `max_bins` weighted points. From it,
//! approximate quantiles, CDF values, mean, variance and modes can be read at
//! any time without storing raw samples. The summary is lossy by design:
//! exactness is traded for O(`max_bins`) memory and query cost.
//!
//! ## Features
//!
//! - **Adaptive resolution**: bins follow the data density, always merging
//!   the two closest bins when the budget is exceeded
//! - **Recency weighting**: an optional decay factor fades older mass so the
//!   summary tracks recent data
//! - **Mergeability**: histograms built on separate workers can be combined
//! - **Import / export**: a plain state record that round-trips exactly
//!
//! ## Quick Start
//!
//! ```rust
//! use streamhist::prelude::*;
//!
//! let mut hist = Histogram::new(20);
//! for i in 0..1000 {
//!     hist.add(i as f64);
//! }
//!
//! println!("p99: {:?}", hist.quantile(0.99));
//! println!("mean: {}", hist.mean());
//! ```
//!
//! ## Distributed Computing
//!
//! [`Histogram`] implements the [`Sketch`](traits::Sketch) trait, so
//! partial histograms can be merged:
//!
//! ```rust
//! use streamhist::histogram::Histogram;
//! use streamhist::traits::{QuantileSketch, Sketch};
//!
//! let mut worker1 = Histogram::new(32);
//! let mut worker2 = Histogram::new(32);
//!
//! worker1.add(1.5);
//! worker2.add(7.25);
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.count(), 2);
//! ```
//!
//! ## Logging
//!
//! Diagnostic events (rejected imports, refused merges, bin merges at trace
//! level) are emitted through [`tracing`]. The crate never installs a
//! subscriber; whichever dispatcher the caller has set, globally or scoped,
//! receives them.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of [`Histogram`] and
//!   [`HistogramState`](histogram::HistogramState)
//! - `full`: Enable everything

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

// Core traits always available
pub mod traits;

pub mod histogram;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::histogram::{Bin, Histogram, HistogramState};
}

pub use histogram::Histogram;
