//! Exact per-key counting, the baseline the sketch is measured against.
use crate::{import_hashbrown, import_std, DefaultHashBuilder, FrequencyEstimator};
use alloc::borrow::ToOwned;
use core::borrow::Borrow;
use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, Hash};

import_hashbrown!(HashMap);
import_std!(HashMap);

/// `ExactCounter` keeps one counter per distinct key. Memory grows with the number of
/// distinct keys, which is what the [`CountMinSketch`] avoids, but estimates are exact.
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
pub struct ExactCounter<K, S = DefaultHashBuilder> {
    counters: HashMap<K, u64, S>,
}

impl<K: Hash + Eq> ExactCounter<K> {
    /// Create an empty `ExactCounter`.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq> Default for ExactCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S: BuildHasher> ExactCounter<K, S> {
    /// Create an empty `ExactCounter` with the given hash builder.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            counters: HashMap::with_hasher(hasher),
        }
    }

    /// Returns the number of distinct keys counted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Returns a bool indicating whether nothing has been counted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl<K: Hash + Eq, S: BuildHasher> FrequencyEstimator<K> for ExactCounter<K, S> {
    fn add<Q>(&mut self, key: &Q, count: u64) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        match self.counters.get_mut(key) {
            Some(v) => {
                *v = v.saturating_add(count);
                *v
            }
            None => {
                self.counters.insert(key.to_owned(), count);
                count
            }
        }
    }

    fn estimate<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counters.get(key).copied().unwrap_or(0)
    }
}

impl<K: Debug, S> Debug for ExactCounter<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.counters.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::{ExactCounter, FrequencyEstimator};
    use std::string::String;

    #[test]
    fn test_exact_counter() {
        let mut c = ExactCounter::<String>::new();
        assert!(c.is_empty());
        assert_eq!(c.add("x", 10), 10);
        assert_eq!(c.add("y", 1), 1);
        assert_eq!(c.add("x", 2), 12);

        assert_eq!(c.estimate("x"), 12);
        assert_eq!(c.estimate("y"), 1);
        assert_eq!(c.estimate("z"), 0);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_exact_counter_saturates() {
        let mut c = ExactCounter::<u64>::new();
        c.add(&1, u64::MAX);
        assert_eq!(c.add(&1, 1), u64::MAX);
    }
}
