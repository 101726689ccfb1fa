//! # courier-std
//!
//! Standard implementations for the courier in-process message bus.
//!
//! This crate provides:
//! - **The bus**: [`Bus`], [`BusBuilder`], [`BusConfig`], [`DuplicatePolicy`]
//! - **Delivery strategies**: [`FailFast`](delivery::FailFast),
//!   [`CollectAll`](delivery::CollectAll)
//! - **Instrumentation**: [`LoggingListener`](instrument::LoggingListener),
//!   [`Traced`](instrument::Traced)
//! - **Process-wide default bus**: [`global`] (feature `global`)
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

mod log;

// Modules
pub mod bus;
pub mod delivery;
#[cfg(feature = "global")]
pub mod global;
pub mod instrument;
pub mod testing;

pub use bus::{Bus, BusBuilder, BusConfig, DuplicatePolicy};
