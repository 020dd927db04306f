use crate::SketchError;
use core::fmt::{Debug, Display, Formatter};

/// TopKError contains the errors of building a [`TopK`]
///
/// [`TopK`]: struct.TopK.html
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub enum TopKError {
    /// Zero sized top-k
    InvalidCapacity(usize),
    /// Invalid error bound for the count-min sketch
    InvalidEpsilon(f64),
    /// Invalid failure probability for the count-min sketch
    InvalidDelta(f64),
}

impl TopKError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TopKError::InvalidCapacity(v) => write!(f, "invalid top-k capacity: {}", *v),
            TopKError::InvalidEpsilon(v) => write!(
                f,
                "invalid epsilon: {}, which should be in range (0.0, 1.0)",
                *v
            ),
            TopKError::InvalidDelta(v) => write!(
                f,
                "invalid delta: {}, which should be in range (0.0, 1.0)",
                *v
            ),
        }
    }
}

impl From<SketchError> for TopKError {
    fn from(e: SketchError) -> Self {
        match e {
            SketchError::InvalidEpsilon(v) => TopKError::InvalidEpsilon(v),
            SketchError::InvalidDelta(v) => TopKError::InvalidDelta(v),
        }
    }
}

impl Display for TopKError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

impl Debug for TopKError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TopKError {}
