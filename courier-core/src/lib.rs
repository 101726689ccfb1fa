//! # courier-core
//!
//! Core traits for the courier in-process message bus.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that only define messages, handlers or listeners and don't need
//! the routing table in `courier-std`.
//!
//! # Delivery Disciplines
//!
//! ## Request/Response ([`Handler`], [`CtxHandler`])
//!
//! Commands and queries have exactly one handler. The handler receives the
//! message by `&mut` and answers by returning an error or by writing a
//! result into the message.
//!
//! ## Broadcast ([`Listener`], [`WildcardListener`])
//!
//! Events have any number of listeners, invoked in registration order.
//! Wildcard listeners see every event through a type-erased [`Envelope`].
//!
//! # Routing Keys
//!
//! Every message type is identified by its [`MessageKey`], derived from the
//! type itself at compile time. Handlers and listeners never name the type
//! they handle separately from their signature.
//!
//! # Error Types
//!
//! - [`BusError`] - Dispatch and publish errors
//! - [`RegistrationError`] - Strict registration errors
//! - [`ContextError`] - Cancellation and deadline reasons

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod handler;
mod listener;
mod message;

// Re-exports
pub use context::Context;
pub use error::{BoxError, BusError, BusResult, ContextError, RegistrationError};
pub use handler::{CtxHandler, Handler};
pub use listener::{Listener, WildcardListener};
pub use message::{Envelope, Message, MessageKey};
