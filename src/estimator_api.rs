//! The capability set a [`TopK`] needs from its frequency source.
//!
//! [`TopK`]: struct.TopK.html
use crate::CountMinSketch;
use alloc::borrow::ToOwned;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// FrequencyEstimator counts occurrences of keys.
/// Estimates may overcount but must never undercount.
pub trait FrequencyEstimator<K> {
    /// Adds `count` occurrences of `key` and returns the new estimate for it.
    fn add<Q>(&mut self, key: &Q, count: u64) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized;

    /// Returns the current estimate for `key`, `0` for a key which was never added.
    /// Does not change the estimator.
    fn estimate<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;
}

impl<K, S: BuildHasher> FrequencyEstimator<K> for CountMinSketch<S> {
    #[inline]
    fn add<Q>(&mut self, key: &Q, count: u64) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        CountMinSketch::add(self, key, count)
    }

    #[inline]
    fn estimate<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        CountMinSketch::estimate(self, key)
    }
}
