//! Terminal rendering
//!
//! One `Total: <count>` line, then one line per bin holding its value and a
//! bar of dots whose length is the bin's share of the total mass, scaled to
//! 200 characters. Values outside `[1e-4, 1e21)` in magnitude are written
//! in exponent form.

use super::streaming::Histogram;
use crate::traits::Sketch;
use core::fmt;

/// Width of a bar holding the entire mass
const BAR_WIDTH: f64 = 200.0;

/// Shortest decimal, switching to exponent form for tiny or huge magnitudes
struct Short(f64);

impl fmt::Display for Short {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if self.0 == 0.0 || (1e-4..1e21).contains(&magnitude) {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{:e}", self.0)
        }
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.count();
        writeln!(f, "Total: {}", total)?;

        for bin in self.bins() {
            let dots = if total == 0 {
                0
            } else {
                (bin.count / total as f64 * BAR_WIDTH) as usize
            };
            write!(f, "{} \t ", Short(bin.value))?;
            for _ in 0..dots {
                f.write_str(".")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
