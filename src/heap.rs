//! A bounded binary min-heap with a key index, so entries can be re-scored in place.
mod error;
pub use error::HeapError;

use crate::{import_hashbrown, import_std, DefaultHashBuilder};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

import_hashbrown!(HashMap);
import_std!(HashMap);

/// A key and its score, as stored in an [`IndexedMinHeap`].
///
/// [`IndexedMinHeap`]: struct.IndexedMinHeap.html
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K> {
    /// the key
    pub key: K,
    /// the score the heap is ordered by
    pub score: u64,
}

impl<K> Entry<K> {
    fn new(key: K, score: u64) -> Self {
        Self { key, score }
    }
}

/// `IndexedMinHeap` is an array backed binary min-heap holding at most `cap` entries.
///
/// Next to the array it keeps a map from key to array position, which is patched on
/// every swap, so [`update`] finds an entry in O(1) and restores the order in O(log n).
/// The heap never evicts by itself: [`push`] on a full heap fails and the caller has to
/// [`pop`] first. Entries with equal scores come out in no particular order.
///
/// # Example
/// ```rust
/// use heavy_hitters::{Entry, IndexedMinHeap};
///
/// let mut heap = IndexedMinHeap::new(2);
/// heap.push("p", 5).unwrap();
/// heap.push("q", 3).unwrap();
/// assert!(heap.push("r", 1).is_err());
///
/// assert_eq!(heap.peek_min().unwrap(), &Entry { key: "q", score: 3 });
/// assert_eq!(heap.pop().unwrap(), Entry { key: "q", score: 3 });
/// assert_eq!(heap.peek_min().unwrap(), &Entry { key: "p", score: 5 });
///
/// assert!(heap.update("p", 1));
/// assert_eq!(heap.get("p"), Some(1));
/// ```
///
/// [`update`]: struct.IndexedMinHeap.html#method.update
/// [`push`]: struct.IndexedMinHeap.html#method.push
/// [`pop`]: struct.IndexedMinHeap.html#method.pop
pub struct IndexedMinHeap<K, S = DefaultHashBuilder> {
    cap: usize,
    entries: Vec<Entry<K>>,
    positions: HashMap<K, usize, S>,
}

impl<K: Hash + Eq + Clone> IndexedMinHeap<K> {
    /// Create a new heap which holds at most `cap` entries.
    pub fn new(cap: usize) -> Self {
        Self::with_hasher(cap, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher> IndexedMinHeap<K, S> {
    /// Create a new heap which holds at most `cap` entries, indexing keys with `hasher`.
    pub fn with_hasher(cap: usize, hasher: S) -> Self {
        Self {
            cap,
            entries: Vec::with_capacity(cap),
            positions: HashMap::with_capacity_and_hasher(cap, hasher),
        }
    }

    /// Returns the entry with the smallest score without removing it.
    pub fn peek_min(&self) -> Result<&Entry<K>, HeapError> {
        self.entries.first().ok_or(HeapError::Empty)
    }

    /// Inserts `key` with `score`.
    ///
    /// Fails with [`HeapError::CapacityExceeded`] when the heap is full. A key which is
    /// already in the heap is re-scored instead, so keys stay unique.
    ///
    /// [`HeapError::CapacityExceeded`]: enum.HeapError.html#variant.CapacityExceeded
    pub fn push(&mut self, key: K, score: u64) -> Result<(), HeapError> {
        if self.update(&key, score) {
            return Ok(());
        }

        if self.entries.len() >= self.cap {
            return Err(HeapError::CapacityExceeded(self.cap));
        }

        let idx = self.entries.len();
        self.positions.insert(key.clone(), idx);
        self.entries.push(Entry::new(key, score));
        self.sift_up(idx);
        Ok(())
    }

    /// Removes and returns the entry with the smallest score.
    pub fn pop(&mut self) -> Result<Entry<K>, HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.entries.len() - 1;
        self.swap(0, last);
        let min = self.entries.pop().ok_or(HeapError::Empty)?;
        self.positions.remove(&min.key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Sets the score of `key` and moves it to its new place in the heap.
    ///
    /// Returns `false`, leaving the heap untouched, if `key` is not in the heap.
    pub fn update<Q>(&mut self, key: &Q, score: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = match self.positions.get(key) {
            Some(idx) => *idx,
            None => return false,
        };

        let old = self.entries[idx].score;
        self.entries[idx].score = score;
        if score < old {
            self.sift_up(idx);
        } else if score > old {
            self.sift_down(idx);
        }
        true
    }

    /// Returns a bool indicating whether the given key is in the heap.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    /// Returns the score of `key`, or `None` if it is not in the heap.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|idx| self.entries[*idx].score)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].score <= self.entries[idx].score {
                break;
            }
            self.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.entries[left].score < self.entries[smallest].score {
                smallest = left;
            }
            if right < len && self.entries[right].score < self.entries[smallest].score {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    // swaps two slots and patches both keys' positions
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        if let Some(pos) = self.positions.get_mut(&self.entries[a].key) {
            *pos = a;
        }
        if let Some(pos) = self.positions.get_mut(&self.entries[b].key) {
            *pos = b;
        }
    }
}

impl<K, S> IndexedMinHeap<K, S> {
    /// Returns the number of entries in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the maximum number of entries the heap can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a bool indicating whether the heap is empty or not.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a bool indicating whether the heap holds `cap` entries.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.cap
    }

    /// An iterator over the entries in heap (array) order, not sorted by score.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<K: Debug, S> Debug for IndexedMinHeap<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexedMinHeap")
            .field("cap", &self.cap)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<K: Clone, S: Clone> Clone for IndexedMinHeap<K, S> {
    fn clone(&self) -> Self {
        Self {
            cap: self.cap,
            entries: self.entries.clone(),
            positions: self.positions.clone(),
        }
    }
}

impl<'a, K, S> IntoIterator for &'a IndexedMinHeap<K, S> {
    type Item = &'a Entry<K>;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// An iterator over the entries of an [`IndexedMinHeap`], in heap order.
///
/// [`IndexedMinHeap`]: struct.IndexedMinHeap.html
pub struct Iter<'a, K> {
    inner: core::slice::Iter<'a, Entry<K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Entry<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

impl<'a, K> FusedIterator for Iter<'a, K> {}
