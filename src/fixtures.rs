//! Random event streams for tests, benchmarks and demos.
//!
//! Nothing in here touches process-wide state: the caller hands in the [`Rng`],
//! so a seeded generator gives a reproducible stream.
//!
//! [`Rng`]: https://docs.rs/rand/0.8/rand/trait.Rng.html
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::RangeInclusive;
use rand::seq::SliceRandom;
use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An endless iterator of random event names made of ASCII letters.
///
/// # Example
/// ```rust
/// use heavy_hitters::fixtures::RandomEvents;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let names: Vec<String> = RandomEvents::new(StdRng::seed_from_u64(1), 8).take(3).collect();
/// assert_eq!(names.len(), 3);
/// assert!(names.iter().all(|n| n.len() == 8));
/// ```
pub struct RandomEvents<R> {
    rng: R,
    name_len: usize,
}

impl<R: Rng> RandomEvents<R> {
    /// Create a new stream of names, each `name_len` letters long.
    pub fn new(rng: R, name_len: usize) -> Self {
        Self { rng, name_len }
    }

    /// Returns the next random name.
    pub fn name(&mut self) -> String {
        (0..self.name_len)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }

    /// Repeats every name a random number of times within `repeats` and shuffles the result.
    pub fn repeat_shuffled(&mut self, names: &[String], repeats: RangeInclusive<usize>) -> Vec<String> {
        let mut events = Vec::new();
        for name in names {
            let n = self.rng.gen_range(repeats.clone());
            events.extend(core::iter::repeat(name).take(n).cloned());
        }
        events.shuffle(&mut self.rng);
        events
    }

    /// Consumes the stream, returning the underlying generator.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng> Iterator for RandomEvents<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.name())
    }
}
