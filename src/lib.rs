//! Approximate frequency counting and top-k heavy hitter tracking over event streams.
//!
//! - [`CountMinSketch`]: a fixed-size count-min sketch which never undercounts.
//! - [`IndexedMinHeap`]: a capacity bounded min-heap whose entries can be re-scored by key.
//! - [`TopK`]: keeps the approximately `k` most frequent keys seen so far, backed by
//!   any [`FrequencyEstimator`] ([`CountMinSketch`] by default, [`ExactCounter`] as a baseline).
//!
//! # Example
//! ```rust
//! use heavy_hitters::TopK;
//!
//! let mut topk = TopK::<String>::new(2).unwrap();
//! for event in ["a", "b", "b", "c", "c", "c"] {
//!     topk.observe(event);
//! }
//!
//! assert!(topk.in_topk("c"));
//! assert!(topk.in_topk("b"));
//! assert!(!topk.in_topk("a"));
//! ```
#![no_std]
#![deny(missing_docs)]
extern crate alloc;
#[cfg(feature = "hashbrown")]
extern crate hashbrown;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[macro_use]
mod macros;
mod polyfill;

mod estimator_api;
mod exact;
mod heap;
mod sketch;
mod topk;

cfg_std!(
    pub mod fixtures;
);

pub use estimator_api::FrequencyEstimator;
pub use exact::ExactCounter;
pub use heap::{Entry, HeapError, IndexedMinHeap, Iter};
pub use sketch::{CountMinSketch, CountMinSketchBuilder, SketchError};
pub use topk::{
    Observation, TopK, TopKBuilder, TopKEntry, TopKError, DEFAULT_DELTA, DEFAULT_EPSILON,
};

/// The default hash builder used by the sketch and by the key index of the heap.
#[cfg(feature = "hashbrown")]
pub type DefaultHashBuilder = hashbrown::hash_map::DefaultHashBuilder;

/// The default hash builder used by the sketch and by the key index of the heap.
#[cfg(not(feature = "hashbrown"))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
