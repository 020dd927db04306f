//! One row of counters of the count-min sketch.
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::ops::Index;

pub(crate) struct CountMinRow(Vec<u64>);

impl CountMinRow {
    pub(crate) fn new(width: usize) -> Self {
        Self(vec![0; width])
    }

    /// Adds `count` to the counter at `i` and returns the new value.
    /// Counters saturate at `u64::MAX` rather than wrapping.
    #[inline]
    pub(crate) fn add(&mut self, i: usize, count: u64) -> u64 {
        let v = self.0[i].saturating_add(count);
        self.0[i] = v;
        v
    }

    #[inline]
    pub(crate) fn get(&self, i: usize) -> u64 {
        self.0[i]
    }
}

impl Clone for CountMinRow {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl Index<usize> for CountMinRow {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl Debug for CountMinRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for v in self.0.iter() {
            write!(f, "{:02} ", v)?;
        }
        Ok(())
    }
}
