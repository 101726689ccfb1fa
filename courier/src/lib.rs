//! # courier - In-Process Message Bus
//!
//! `courier` lets independent parts of an application talk to each other
//! without holding references to each other. Callers hand the bus a typed
//! message; the bus routes it by type:
//!
//! - **dispatch**: to the single handler for a command or query type
//! - **publish**: to every listener for an event type, then to every
//!   wildcard listener
//!
//! Handlers and listeners are registered by their signature alone: the
//! message type they accept is the routing key.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! #[derive(Message)]
//! struct CreateUser { name: String, id: Option<u64> }
//!
//! #[derive(Message)]
//! struct UserCreated { id: u64 }
//!
//! fn create_user(cmd: &mut CreateUser) -> BusResult {
//!     cmd.id = Some(1);
//!     Ok(())
//! }
//!
//! fn send_welcome_mail(event: &UserCreated) -> BusResult { Ok(()) }
//!
//! let bus = Bus::builder()
//!     .handler(create_user)
//!     .listener(send_welcome_mail)
//!     .build();
//!
//! let mut cmd = CreateUser { name: "a".into(), id: None };
//! bus.dispatch(&mut cmd)?;
//! bus.publish(&UserCreated { id: cmd.id.unwrap() })?;
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): registration and delivery logging, [`LoggingListener`], [`Traced`] spans
//! - `global` (default): the process-wide default bus in [`global`]
//! - `macros` (default): `#[derive(Message)]`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use courier_core::{
    // Error types
    BoxError,
    BusError,
    BusResult,
    // Context
    Context,
    ContextError,
    // Handler
    CtxHandler,
    // Message
    Envelope,
    Handler,
    // Listener
    Listener,
    Message,
    MessageKey,
    RegistrationError,
    WildcardListener,
};

// The bus
pub use courier_std::{Bus, BusBuilder, BusConfig, DuplicatePolicy};

// Instrumentation
pub use courier_std::instrument::{LoggingListener, Traced};

/// Delivery strategies for published events.
pub mod delivery {
    pub use courier_std::delivery::{CollectAll, DeliveryStrategy, FailFast, Recipient};
}

/// The process-wide default bus.
#[cfg(feature = "global")]
pub mod global {
    pub use courier_std::global::{
        add_ctx_handler, add_event_listener, add_handler, add_wildcard_listener, dispatch,
        dispatch_ctx, publish, reset, with_bus,
    };
}

/// Testing utilities.
pub mod testing {
    pub use courier_std::testing::{CountingHandler, OrderLog, RecordingListener};
}

/// Prelude module - common imports for courier.
///
/// `Message` brings in the derive macro as well when the `macros` feature is
/// enabled.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Bus
        Bus,
        BusError,
        BusResult,
        Context,
        CtxHandler,
        Envelope,
        // Core traits
        Handler,
        Listener,
        Message,
        WildcardListener,
    };
}

#[cfg(feature = "macros")]
pub use courier_macros::Message;
