//! Error types for courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BusError`] - Errors returned by dispatch and publish
//! - [`RegistrationError`] - Errors from strict handler registration
//! - [`ContextError`] - Why a [`Context`](crate::Context) is done

use thiserror::Error;

/// A boxed error type for errors produced by handlers and listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The return type of every handler and listener.
pub type BusResult = Result<(), BoxError>;

/// Errors returned by dispatch and publish operations.
///
/// Handler and listener errors are carried transparently: their `Display`
/// and `source` are those of the original error, and [`BusError::into_inner`]
/// gives the original box back untouched.
#[derive(Error, Debug)]
pub enum BusError {
    /// No handler is registered for the message type.
    #[error("handler not found for message `{message}`")]
    HandlerNotFound {
        /// Type name of the message that was dispatched.
        message: &'static str,
    },

    /// The handler returned an error.
    #[error(transparent)]
    Handler(BoxError),

    /// A listener returned an error; later listeners were not invoked.
    #[error(transparent)]
    Listener(BoxError),

    /// One or more listeners failed while delivering to every recipient.
    #[error("{} listener(s) failed for event `{event}`", .errors.len())]
    Listeners {
        /// Type name of the published event.
        event: &'static str,
        /// Every failure, in invocation order.
        errors: Vec<BoxError>,
    },
}

impl BusError {
    /// Returns `true` for [`BusError::HandlerNotFound`].
    pub fn is_handler_not_found(&self) -> bool {
        matches!(self, BusError::HandlerNotFound { .. })
    }

    /// The error produced by a handler or listener, if this is one.
    ///
    /// Aggregated listener failures are not unwrapped; match on
    /// [`BusError::Listeners`] to inspect them.
    pub fn into_inner(self) -> Option<BoxError> {
        match self {
            BusError::Handler(err) | BusError::Listener(err) => Some(err),
            _ => None,
        }
    }

    /// Borrow the handler or listener error as a concrete type.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match self {
            BusError::Handler(err) | BusError::Listener(err) => err.downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// Errors from strict handler registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A handler is already registered for this message type.
    #[error("handler already registered for message `{message}`")]
    DuplicateHandler {
        /// Type name of the message.
        message: &'static str,
    },
}

/// Why a context is done.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context was cancelled.
    #[error("context cancelled")]
    Cancelled,

    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}
