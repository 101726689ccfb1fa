//! Observability for handlers and listeners.
//!
//! - [`LoggingListener`] - a wildcard listener that logs every published event
//! - [`Traced`] - runs a handler or listener inside a `tracing` span
//!
//! Both compile to plain pass-throughs when the `tracing` feature is off.

mod logging;
mod traced;

pub use logging::LoggingListener;
pub use traced::Traced;
