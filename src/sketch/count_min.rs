use crate::sketch::{depth_for, in_unit_interval, width_for, CountMinRow, SketchError};
use crate::DefaultHashBuilder;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, Hash, Hasher};

const LOW_32_MASK: u64 = 0xffff_ffff;

/// `CountMinSketchBuilder` is used to help build a [`CountMinSketch`] with custom configurations.
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
pub struct CountMinSketchBuilder<S = DefaultHashBuilder> {
    epsilon: f64,
    delta: f64,
    hasher: S,
}

impl<S: BuildHasher + Default> Default for CountMinSketchBuilder<S> {
    fn default() -> Self {
        Self {
            epsilon: crate::DEFAULT_EPSILON,
            delta: crate::DEFAULT_DELTA,
            hasher: S::default(),
        }
    }
}

impl<S: BuildHasher + Default> CountMinSketchBuilder<S> {
    /// The constructor of CountMinSketchBuilder
    pub fn new(epsilon: f64, delta: f64) -> Self {
        Self::default().set_epsilon(epsilon).set_delta(delta)
    }
}

impl<S: BuildHasher> CountMinSketchBuilder<S> {
    /// Construct a CountMinSketchBuilder using the custom hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            epsilon: crate::DEFAULT_EPSILON,
            delta: crate::DEFAULT_DELTA,
            hasher,
        }
    }

    /// Set the error bound, relative to the total count added.
    pub fn set_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Set the probability that an estimate exceeds the error bound.
    pub fn set_delta(self, delta: f64) -> Self {
        Self { delta, ..self }
    }

    /// Set the hash builder used to derive the row positions of a key
    pub fn set_hasher<NS: BuildHasher>(self, hasher: NS) -> CountMinSketchBuilder<NS> {
        CountMinSketchBuilder {
            epsilon: self.epsilon,
            delta: self.delta,
            hasher,
        }
    }

    /// Finalize the builder to [`CountMinSketch`]
    ///
    /// [`CountMinSketch`]: struct.CountMinSketch.html
    pub fn finalize(self) -> Result<CountMinSketch<S>, SketchError> {
        if !in_unit_interval(self.epsilon) {
            return Err(SketchError::InvalidEpsilon(self.epsilon));
        }

        if !in_unit_interval(self.delta) {
            return Err(SketchError::InvalidDelta(self.delta));
        }

        let width = width_for(self.epsilon);
        let depth = depth_for(self.delta);
        debug_event!(depth, width, "allocating count-min sketch");

        Ok(CountMinSketch {
            rows: (0..depth).map(|_| CountMinRow::new(width)).collect(),
            width,
            epsilon: self.epsilon,
            delta: self.delta,
            hasher: self.hasher,
        })
    }
}

/// `CountMinSketch` estimates how often a key has been added, using `depth x width` counters
/// no matter how many distinct keys are seen.
///
/// The estimate of a key is never smaller than the true count. With probability `1 - delta`
/// it overshoots by at most `epsilon` times the total of all counts added.
///
/// Row positions come from double hashing: a key is hashed once, the low and high 32 bits
/// give `h1` and `h2`, and row `i` uses `(h1 + i * h2) mod width`.
///
/// # Example
/// ```rust
/// use heavy_hitters::CountMinSketch;
///
/// let mut cms = CountMinSketch::new(0.01, 0.01).unwrap();
/// assert_eq!(cms.depth(), 5);
/// assert_eq!(cms.width(), 272);
///
/// assert!(cms.add("x", 10) >= 10);
/// cms.add("y", 1);
///
/// assert!(cms.estimate("x") >= 10);
/// assert!(cms.estimate("y") >= 1);
/// assert_eq!(cms.estimate("never seen"), 0);
/// ```
#[derive(Clone)]
pub struct CountMinSketch<S = DefaultHashBuilder> {
    rows: Vec<CountMinRow>,
    width: usize,
    epsilon: f64,
    delta: f64,
    hasher: S,
}

impl CountMinSketch {
    /// Create a new `CountMinSketch` from an error bound `epsilon` and a failure probability
    /// `delta`, both in (0, 1).
    ///
    /// The sketch has `ceil(ln(1 / delta))` rows of `ceil(e / epsilon)` counters.
    pub fn new(epsilon: f64, delta: f64) -> Result<Self, SketchError> {
        CountMinSketchBuilder::new(epsilon, delta).finalize()
    }
}

impl<S: BuildHasher> CountMinSketch<S> {
    /// Create a new `CountMinSketch` with the given hash builder.
    pub fn with_hasher(epsilon: f64, delta: f64, hasher: S) -> Result<Self, SketchError> {
        CountMinSketchBuilder::with_hasher(hasher)
            .set_epsilon(epsilon)
            .set_delta(delta)
            .finalize()
    }

    /// Adds `count` occurrences of `key` and returns the new estimate for it.
    pub fn add<Q: Hash + ?Sized>(&mut self, key: &Q, count: u64) -> u64 {
        let (h1, h2) = self.hash_pair(key);
        let width = self.width;
        let mut min = u64::MAX;
        self.rows.iter_mut().enumerate().for_each(|(i, row)| {
            let v = row.add(position(h1, h2, i, width), count);
            if v < min {
                min = v;
            }
        });
        min
    }

    /// Returns the estimated count of `key`, the smallest of its `depth` counters.
    /// A key which was never added estimates to `0` unless all of its counters collide.
    pub fn estimate<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let (h1, h2) = self.hash_pair(key);
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.get(position(h1, h2, i, self.width)))
            .min()
            .unwrap_or(0)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of counters per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the error bound the sketch was built with.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the failure probability the sketch was built with.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the sketch's [`BuildHasher`].
    ///
    /// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    #[inline]
    fn hash_pair<Q: Hash + ?Sized>(&self, key: &Q) -> (u64, u64) {
        let mut s = self.hasher.build_hasher();
        key.hash(&mut s);
        let h = s.finish();
        (h & LOW_32_MASK, h >> 32)
    }
}

// both halves fit in 32 bits, so this only wraps for absurd depths
#[inline(always)]
fn position(h1: u64, h2: u64, i: usize, width: usize) -> usize {
    (h1.wrapping_add((i as u64).wrapping_mul(h2)) % width as u64) as usize
}

impl<S> Debug for CountMinSketch<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CountMinSketch")
            .field("depth", &self.rows.len())
            .field("width", &self.width)
            .field("epsilon", &self.epsilon)
            .field("delta", &self.delta)
            .finish()
    }
}
