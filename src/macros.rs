#[macro_export]
#[doc(hidden)]
macro_rules! import_hashbrown {
    ($($t:ident),*) => {
        #[cfg(feature = "hashbrown")]
        use hashbrown::{$($t),*,};
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! import_std {
    ($($t:ident),*) => {
        #[cfg(not(feature = "hashbrown"))]
        use std::collections::{$($t),*,};
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! cfg_std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
            $item
        )*
    }
}

/// Forwards to `tracing::debug!` when the `tracing` feature is enabled, otherwise expands to nothing.
#[macro_export]
#[doc(hidden)]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    }
}

/// Forwards to `tracing::trace!` when the `tracing` feature is enabled, otherwise expands to nothing.
#[macro_export]
#[doc(hidden)]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    }
}
