//! Online top-k heavy hitters: a frequency estimator feeding a bounded min-heap.
mod error;
pub use error::TopKError;

use crate::heap::{HeapError, IndexedMinHeap};
use crate::sketch::CountMinSketchBuilder;
use crate::{CountMinSketch, DefaultHashBuilder, ExactCounter, FrequencyEstimator};
use alloc::borrow::ToOwned;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, Hash};

/// The default error bound of the sketch behind a [`TopK`].
///
/// [`TopK`]: struct.TopK.html
pub const DEFAULT_EPSILON: f64 = 0.001;

/// The default failure probability of the sketch behind a [`TopK`].
///
/// [`TopK`]: struct.TopK.html
pub const DEFAULT_DELTA: f64 = 0.001;

/// `TopKEntry` is a tracked key with its current estimated count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopKEntry<K> {
    /// the key
    pub key: K,
    /// the estimated number of occurrences
    pub count: u64,
}

/// `Observation` is returned by [`TopK::observe`] and tells what happened to the tracked set.
///
/// [`TopK::observe`]: struct.TopK.html#method.observe
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation<K> {
    /// The key was already tracked, its count was refreshed.
    Updated,
    /// The key was added to a tracked set which still had room.
    Admitted,
    /// The key was added, and `key` with the smallest `count` was dropped to make room.
    Evicted {
        /// the evicted key
        key: K,
        /// the count the evicted key was tracked with
        count: u64,
    },
    /// The key's estimate did not beat the smallest tracked count. It still counts
    /// towards future observations.
    Rejected,
}

/// `TopKBuilder` is used to help build a [`TopK`] with custom configurations.
///
/// [`TopK`]: struct.TopK.html
pub struct TopKBuilder<SH = DefaultHashBuilder, IH = DefaultHashBuilder> {
    k: usize,
    epsilon: f64,
    delta: f64,
    estimator_hasher: SH,
    index_hasher: IH,
}

impl<SH: BuildHasher + Default, IH: BuildHasher + Default> TopKBuilder<SH, IH> {
    /// The constructor of TopKBuilder
    pub fn new(k: usize) -> Self {
        Self::with_hashers(SH::default(), IH::default()).set_k(k)
    }
}

impl<SH: BuildHasher, IH: BuildHasher> TopKBuilder<SH, IH> {
    /// Construct a TopKBuilder using custom hashers for the estimator and for the heap's key index.
    pub fn with_hashers(estimator_hasher: SH, index_hasher: IH) -> Self {
        Self {
            k: 0,
            epsilon: DEFAULT_EPSILON,
            delta: DEFAULT_DELTA,
            estimator_hasher,
            index_hasher,
        }
    }

    /// Set the number of keys to track
    pub fn set_k(self, k: usize) -> Self {
        Self { k, ..self }
    }

    /// Set the error bound of the count-min sketch
    pub fn set_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the failure probability of the count-min sketch
    pub fn set_delta(self, delta: f64) -> Self {
        Self { delta, ..self }
    }

    /// Set the estimator's hash builder
    pub fn set_estimator_hasher<NSH: BuildHasher>(self, hasher: NSH) -> TopKBuilder<NSH, IH> {
        TopKBuilder {
            k: self.k,
            epsilon: self.epsilon,
            delta: self.delta,
            estimator_hasher: hasher,
            index_hasher: self.index_hasher,
        }
    }

    /// Set the hash builder of the heap's key index
    pub fn set_index_hasher<NIH: BuildHasher>(self, hasher: NIH) -> TopKBuilder<SH, NIH> {
        TopKBuilder {
            k: self.k,
            epsilon: self.epsilon,
            delta: self.delta,
            estimator_hasher: self.estimator_hasher,
            index_hasher: hasher,
        }
    }

    /// Finalize the builder to a [`TopK`] backed by a [`CountMinSketch`]
    ///
    /// [`TopK`]: struct.TopK.html
    /// [`CountMinSketch`]: struct.CountMinSketch.html
    pub fn finalize<K: Hash + Eq + Clone>(
        self,
    ) -> Result<TopK<K, CountMinSketch<SH>, IH>, TopKError> {
        if self.k == 0 {
            return Err(TopKError::InvalidCapacity(0));
        }

        let sketch = CountMinSketchBuilder::with_hasher(self.estimator_hasher)
            .set_epsilon(self.epsilon)
            .set_delta(self.delta)
            .finalize()?;

        TopK::with_estimator_and_hasher(self.k, sketch, self.index_hasher)
    }

    /// Finalize the builder to a [`TopK`] backed by an [`ExactCounter`].
    /// `epsilon` and `delta` are not used.
    ///
    /// [`TopK`]: struct.TopK.html
    /// [`ExactCounter`]: struct.ExactCounter.html
    pub fn finalize_exact<K: Hash + Eq + Clone>(
        self,
    ) -> Result<TopK<K, ExactCounter<K, SH>, IH>, TopKError> {
        TopK::with_estimator_and_hasher(
            self.k,
            ExactCounter::with_hasher(self.estimator_hasher),
            self.index_hasher,
        )
    }
}

/// `TopK` tracks, online, the approximately `k` most frequent keys of a stream.
///
/// Every observation is counted by the estimator (a [`CountMinSketch`] unless built
/// otherwise). The tracked keys live in an [`IndexedMinHeap`] scored by their estimates:
/// - a tracked key gets its score refreshed;
/// - while fewer than `k` keys are tracked, a new key is admitted unconditionally;
/// - once full, a new key is admitted only if its estimate is strictly greater than the
///   smallest tracked score, which is evicted.
///
/// Only the heap holds per-key state, so memory stays at the sketch plus `O(k)`.
///
/// # Example
/// ```rust
/// use heavy_hitters::{Observation, TopK};
///
/// let mut topk = TopK::<String>::new(3).unwrap();
/// assert_eq!(topk.observe("a"), Observation::Admitted);
/// for (event, times) in [("b", 2), ("c", 3), ("d", 4)] {
///     (0..times).for_each(|_| {
///         topk.observe(event);
///     });
/// }
///
/// assert!(!topk.in_topk("a"));
/// assert!(topk.in_topk("d"));
///
/// let top = topk.sorted_topk();
/// assert_eq!(top[0].key, "d");
/// assert!(top[0].count >= 4);
/// ```
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
/// [`IndexedMinHeap`]: struct.IndexedMinHeap.html
pub struct TopK<K, E = CountMinSketch, S = DefaultHashBuilder> {
    k: usize,
    estimator: E,
    heap: IndexedMinHeap<K, S>,
}

impl<K: Hash + Eq + Clone> TopK<K> {
    /// Create a `TopK` for `k` keys, backed by a count-min sketch with the default
    /// [`DEFAULT_EPSILON`] and [`DEFAULT_DELTA`].
    ///
    /// [`DEFAULT_EPSILON`]: constant.DEFAULT_EPSILON.html
    /// [`DEFAULT_DELTA`]: constant.DEFAULT_DELTA.html
    pub fn new(k: usize) -> Result<Self, TopKError> {
        TopKBuilder::new(k).finalize()
    }
}

impl<K: Hash + Eq + Clone> TopK<K, ExactCounter<K>> {
    /// Create a `TopK` for `k` keys which counts every key exactly.
    /// Useful as a baseline; memory grows with the number of distinct keys.
    pub fn exact(k: usize) -> Result<Self, TopKError> {
        TopKBuilder::new(k).finalize_exact()
    }
}

impl<K: Hash + Eq + Clone, E: FrequencyEstimator<K>> TopK<K, E> {
    /// Create a `TopK` for `k` keys on top of the given estimator.
    pub fn with_estimator(k: usize, estimator: E) -> Result<Self, TopKError> {
        Self::with_estimator_and_hasher(k, estimator, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, E: FrequencyEstimator<K>, S: BuildHasher> TopK<K, E, S> {
    /// Create a `TopK` for `k` keys on top of the given estimator, indexing the tracked
    /// keys with `hasher`.
    pub fn with_estimator_and_hasher(k: usize, estimator: E, hasher: S) -> Result<Self, TopKError> {
        if k == 0 {
            return Err(TopKError::InvalidCapacity(0));
        }

        debug_event!(k, "creating top-k tracker");
        Ok(Self {
            k,
            estimator,
            heap: IndexedMinHeap::with_hasher(k, hasher),
        })
    }

    /// Counts one occurrence of `key` and updates the tracked set.
    pub fn observe<Q>(&mut self, key: &Q) -> Observation<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.observe_n(key, 1)
    }

    /// Counts `count` occurrences of `key` at once and updates the tracked set.
    pub fn observe_n<Q>(&mut self, key: &Q, count: u64) -> Observation<K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let estimate = self.estimator.add(key, count);
        if self.heap.update(key, estimate) {
            return Observation::Updated;
        }

        // with k > 0 a full heap always has a minimum and has room again after a pop
        self.admit(key, estimate).unwrap_or(Observation::Rejected)
    }

    fn admit<Q>(&mut self, key: &Q, estimate: u64) -> Result<Observation<K>, HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if !self.heap.is_full() {
            self.heap.push(key.to_owned(), estimate)?;
            return Ok(Observation::Admitted);
        }

        if estimate <= self.heap.peek_min()?.score {
            return Ok(Observation::Rejected);
        }

        let evicted = self.heap.pop()?;
        self.heap.push(key.to_owned(), estimate)?;
        trace_event!(
            evicted_count = evicted.score,
            admitted_count = estimate,
            "evicted key from top-k"
        );
        Ok(Observation::Evicted {
            key: evicted.key,
            count: evicted.score,
        })
    }

    /// Returns every tracked key with its current estimate, re-read from the estimator.
    /// The result is in no particular order, see [`sorted_topk`].
    ///
    /// [`sorted_topk`]: struct.TopK.html#method.sorted_topk
    pub fn topk(&self) -> Vec<TopKEntry<K>> {
        self.heap
            .iter()
            .map(|e| TopKEntry {
                key: e.key.clone(),
                count: self.estimator.estimate(&e.key),
            })
            .collect()
    }

    /// Like [`topk`], but sorted by count, most frequent first.
    ///
    /// [`topk`]: struct.TopK.html#method.topk
    pub fn sorted_topk(&self) -> Vec<TopKEntry<K>> {
        let mut top = self.topk();
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top
    }

    /// Returns a bool indicating whether `key` is currently tracked.
    #[inline]
    pub fn in_topk<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.heap.contains(key)
    }

    /// Returns the estimator's current count for `key`, tracked or not.
    #[inline]
    pub fn estimate<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.estimator.estimate(key)
    }
}

impl<K, E, S> TopK<K, E, S> {
    /// Returns the number of keys currently tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns a bool indicating whether no key is tracked yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the maximum number of keys tracked.
    #[inline]
    pub fn cap(&self) -> usize {
        self.k
    }

    /// Returns the underlying estimator.
    #[inline]
    pub fn estimator(&self) -> &E {
        &self.estimator
    }
}

impl<K: Debug, E: Debug, S> Debug for TopK<K, E, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TopK")
            .field("k", &self.k)
            .field("estimator", &self.estimator)
            .field("heap", &self.heap)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::heap::test::assert_heap_invariants;
    use crate::sketch::test::CollidingBuildHasher;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashSet;
    use std::string::{String, ToString};
    use std::vec;

    fn observe_counts<E: FrequencyEstimator<String>>(
        topk: &mut TopK<String, E>,
        counts: &[(&str, usize)],
    ) {
        for (event, times) in counts {
            (0..*times).for_each(|_| {
                topk.observe(*event);
            });
        }
    }

    #[test]
    fn test_topk_evicts_least_frequent() {
        let mut topk = TopK::<String>::new(3).unwrap();
        observe_counts(&mut topk, &[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

        assert!(!topk.in_topk("a"));
        assert!(topk.in_topk("b"));
        assert!(topk.in_topk("c"));
        assert!(topk.in_topk("d"));
        assert_eq!(topk.len(), 3);
        assert_heap_invariants(&topk.heap);
    }

    #[test]
    fn test_exact_topk_evicts_least_frequent() {
        let mut topk = TopK::<String, _>::exact(3).unwrap();
        observe_counts(&mut topk, &[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

        let top = topk.sorted_topk();
        assert_eq!(
            top,
            vec![
                TopKEntry { key: "d".to_string(), count: 4 },
                TopKEntry { key: "c".to_string(), count: 3 },
                TopKEntry { key: "b".to_string(), count: 2 },
            ]
        );
        // "a" stays counted even though it is not tracked
        assert_eq!(topk.estimate("a"), 1);
    }

    #[test]
    fn test_observation_results() {
        let mut topk = TopK::<String, _>::exact(2).unwrap();
        assert_eq!(topk.observe("x"), Observation::Admitted);
        assert_eq!(topk.observe("x"), Observation::Updated);
        assert_eq!(topk.observe("y"), Observation::Admitted);
        // ties with the minimum do not get in
        assert_eq!(topk.observe("z"), Observation::Rejected);
        assert_eq!(topk.observe("z"), Observation::Evicted { key: "y".to_string(), count: 1 });
        assert!(topk.in_topk("x"));
        assert!(topk.in_topk("z"));
        assert!(!topk.in_topk("y"));
    }

    #[test]
    fn test_kth_admission_is_unconditional() {
        let mut topk = TopK::<String, _>::exact(3).unwrap();
        topk.observe_n("heavy", 10);
        topk.observe("x");
        // the k-th key gets in although it does not exceed the current minimum
        assert_eq!(topk.observe("y"), Observation::Admitted);
        assert_eq!(topk.len(), 3);
        // the set is full now, and one more occurrence of a new key is not enough
        assert_eq!(topk.observe("z"), Observation::Rejected);
        assert_eq!(topk.len(), 3);
        assert!(!topk.in_topk("z"));
    }

    #[test]
    fn test_observe_n() {
        let mut topk = TopK::<String>::new(1).unwrap();
        assert_eq!(topk.observe_n("a", 5), Observation::Admitted);
        assert_eq!(topk.observe_n("b", 5), Observation::Rejected);
        match topk.observe_n("b", 1) {
            Observation::Evicted { key, count } => {
                assert_eq!(key, "a");
                assert!(count >= 5);
            }
            other => panic!("expected an eviction, got {:?}", other),
        }
        assert!(topk.estimate("b") >= 6);
    }

    #[test]
    fn test_invalid_params() {
        assert_eq!(TopK::<String>::new(0).unwrap_err(), TopKError::InvalidCapacity(0));
        assert_eq!(
            TopK::<String, _>::exact(0).unwrap_err(),
            TopKError::InvalidCapacity(0)
        );
        assert_eq!(
            TopKBuilder::<DefaultHashBuilder, DefaultHashBuilder>::new(3)
                .set_epsilon(1.0)
                .finalize::<String>()
                .unwrap_err(),
            TopKError::InvalidEpsilon(1.0)
        );
        assert_eq!(
            TopKBuilder::<DefaultHashBuilder, DefaultHashBuilder>::new(3)
                .set_delta(0.0)
                .finalize::<String>()
                .unwrap_err(),
            TopKError::InvalidDelta(0.0)
        );
    }

    #[test]
    fn test_topk_rereads_estimator() {
        // every key shares every counter, so each estimate is the length of the stream
        let mut topk = TopKBuilder::<DefaultHashBuilder, DefaultHashBuilder>::new(2)
            .set_estimator_hasher(CollidingBuildHasher::default())
            .finalize::<String>()
            .unwrap();
        assert_eq!(topk.observe("a"), Observation::Admitted);
        assert_eq!(topk.observe("b"), Observation::Admitted);

        // "a" was scored 1 when admitted, but reports what the sketch says now
        assert_eq!(topk.heap.get("a"), Some(1));
        assert_eq!(topk.estimator().estimate("a"), 2);
        assert!(topk.topk().iter().all(|e| e.count == 2));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut topk = TopK::<u32>::new(5).unwrap();
        (0..2_000).for_each(|_| {
            topk.observe(&rng.gen_range(0..50u32));
        });
        assert_eq!(topk.topk(), topk.topk());
        assert_eq!(topk.sorted_topk(), topk.sorted_topk());
        assert_eq!(topk.estimate(&7), topk.estimate(&7));
    }

    #[test]
    fn test_membership_stays_at_k() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut topk = TopK::<u32, _>::exact(8).unwrap();
        (0..10_000).for_each(|_| {
            // skewed towards small keys
            let key = rng.gen_range(0..64u32) * rng.gen_range(0..4u32);
            let before: HashSet<u32> = topk.topk().into_iter().map(|e| e.key).collect();
            let full = topk.len() == topk.cap();
            match topk.observe(&key) {
                Observation::Evicted { key: evicted, .. } => {
                    assert!(full);
                    assert!(before.contains(&evicted));
                    assert!(!topk.in_topk(&evicted));
                    assert!(topk.in_topk(&key));
                    assert_eq!(topk.len(), topk.cap());
                }
                Observation::Admitted => {
                    assert!(!full);
                    assert_eq!(topk.len(), before.len() + 1);
                }
                Observation::Updated => {
                    assert!(before.contains(&key));
                    assert_eq!(topk.len(), before.len());
                }
                Observation::Rejected => {
                    assert!(full);
                    assert!(!topk.in_topk(&key));
                }
            }
            assert!(topk.len() <= topk.cap());
            assert_heap_invariants(&topk.heap);
        });
        assert_eq!(topk.len(), 8);
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_topk_finds_heavy_hitters() {
        use crate::fixtures::RandomEvents;

        let mut events = RandomEvents::new(StdRng::seed_from_u64(1), 12);
        let light: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let heavy: Vec<String> = (10..13).map(|i| i.to_string()).collect();
        let mut stream = events.repeat_shuffled(&light, 2..=6);
        stream.extend(events.repeat_shuffled(&heavy, 10..=15));

        let mut topk = TopK::<String>::new(3).unwrap();
        stream.iter().for_each(|e| {
            topk.observe(e.as_str());
        });

        let tracked: HashSet<String> = topk.topk().into_iter().map(|e| e.key).collect();
        let expected: HashSet<String> = heavy.into_iter().collect();
        assert_eq!(tracked, expected);
    }

    #[test]
    #[cfg(feature = "std")]
    #[cfg_attr(miri, ignore)]
    fn test_serialized_callers() {
        use scoped_threadpool::Pool;
        use std::format;
        use std::sync::Mutex;

        let topk = Mutex::new(TopK::<String>::new(2).unwrap());
        let mut pool = Pool::new(4);
        pool.scoped(|scope| {
            for t in 0..4 {
                let topk = &topk;
                scope.execute(move || {
                    (0..100).for_each(|i| {
                        let mut guard = topk.lock().unwrap();
                        guard.observe("hot");
                        guard.observe(format!("cold-{}-{}", t, i).as_str());
                    });
                });
            }
        });

        let topk = topk.into_inner().unwrap();
        assert!(topk.in_topk("hot"));
        assert!(topk.estimate("hot") >= 400);
        assert_eq!(topk.len(), 2);
    }
}
