use core::fmt::{Debug, Display, Formatter};

/// `SketchError` is returned when a [`CountMinSketch`] is built from invalid parameters.
///
/// [`CountMinSketch`]: struct.CountMinSketch.html
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub enum SketchError {
    /// Error bound outside of (0.0, 1.0)
    InvalidEpsilon(f64),
    /// Failure probability outside of (0.0, 1.0)
    InvalidDelta(f64),
}

impl SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SketchError::InvalidEpsilon(v) => write!(
                f,
                "invalid epsilon: {}, which should be in range (0.0, 1.0)",
                *v
            ),
            SketchError::InvalidDelta(v) => write!(
                f,
                "invalid delta: {}, which should be in range (0.0, 1.0)",
                *v
            ),
        }
    }
}

impl Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

impl Debug for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt(f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SketchError {}
