//! Count-min sketch, see [An Improved Data Stream Summary: The Count-Min Sketch and its Applications].
//!
//! [An Improved Data Stream Summary: The Count-Min Sketch and its Applications]: http://dimacs.rutgers.edu/~graham/pubs/papers/cm-full.pdf
mod count_min;
mod error;
mod row;

pub use count_min::{CountMinSketch, CountMinSketchBuilder};
pub use error::SketchError;
pub(crate) use row::CountMinRow;

use crate::polyfill::{ceil, ln};
use core::f64::consts::E;

/// Returns `true` if `v` lies in the open interval (0, 1).
#[inline]
pub(crate) fn in_unit_interval(v: f64) -> bool {
    v > 0.0 && v < 1.0
}

// counters per row: ceil(e / epsilon)
#[inline]
pub(crate) fn width_for(epsilon: f64) -> usize {
    ceil(E / epsilon) as usize
}

// number of rows: ceil(ln(1 / delta))
#[inline]
pub(crate) fn depth_for(delta: f64) -> usize {
    ceil(ln(1.0 / delta)) as usize
}
