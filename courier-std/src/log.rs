//! Internal logging macros.
//!
//! Forward to `tracing` when the `tracing` feature is enabled and compile to
//! nothing otherwise.

macro_rules! bus_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

macro_rules! bus_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

macro_rules! bus_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!($($arg)*);
        }
    };
}

pub(crate) use {bus_debug, bus_trace, bus_warn};
