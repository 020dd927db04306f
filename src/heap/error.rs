use core::fmt::{Display, Formatter};

/// `HeapError` is the error of [`IndexedMinHeap`].
///
/// [`IndexedMinHeap`]: struct.IndexedMinHeap.html
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` or `peek_min` on an empty heap
    Empty,
    /// `push` on a heap which already holds its capacity
    CapacityExceeded(usize),
}

impl Display for HeapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::CapacityExceeded(cap) => {
                write!(f, "heap is full (capacity {}), pop before pushing", *cap)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HeapError {}
