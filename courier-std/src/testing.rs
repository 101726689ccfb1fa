//! Testing utilities for courier.
//!
//! This module provides utilities to make testing handlers and listeners easier.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that records every event it receives
//! - [`OrderLog`]: A shared log for asserting invocation order across listeners
//! - [`CountingHandler`]: A handler that counts invocations

use courier_core::{BusResult, Envelope, Handler, Listener, Message, WildcardListener};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all events it receives.
///
/// Useful for verifying that events are being published correctly.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<UserCreated>::new();
/// bus.add_event_listener(recorder.clone());
///
/// bus.publish(&UserCreated { id: 1 })?;
///
/// assert_eq!(recorder.events(), vec![UserCreated { id: 1 }]);
/// ```
pub struct RecordingListener<E: Clone> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> RecordingListener<E> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Clone> Default for RecordingListener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for RecordingListener<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E: Message + Clone> Listener<E> for RecordingListener<E> {
    fn on_event(&self, event: &E) -> BusResult {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Order Log
// ============================================================================

/// A shared log of named invocations.
///
/// Each listener created from the same log appends its name when invoked,
/// so a test can assert on the exact order recipients ran in.
///
/// # Example
///
/// ```rust,ignore
/// let log = OrderLog::new();
/// bus.add_event_listener(log.listener::<UserCreated>("L1"));
/// bus.add_wildcard_listener(log.wildcard("W1"));
///
/// bus.publish(&UserCreated { id: 1 })?;
/// assert_eq!(log.entries(), vec!["L1", "W1"]);
/// ```
#[derive(Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl OrderLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` to the log.
    pub fn record(&self, name: &'static str) {
        self.entries.lock().unwrap().push(name);
    }

    /// Names recorded so far, in order.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().unwrap().clone()
    }

    /// A listener for `E` that records `name` and succeeds.
    pub fn listener<E: Message>(&self, name: &'static str) -> impl Listener<E> + use<E> {
        let log = self.clone();
        move |_: &E| -> BusResult {
            log.record(name);
            Ok(())
        }
    }

    /// A listener for `E` that records `name` and fails with `error`.
    pub fn failing_listener<E: Message>(
        &self,
        name: &'static str,
        error: &'static str,
    ) -> impl Listener<E> + use<E> {
        let log = self.clone();
        move |_: &E| -> BusResult {
            log.record(name);
            Err(error.into())
        }
    }

    /// A wildcard listener that records `name` and succeeds.
    pub fn wildcard(&self, name: &'static str) -> impl WildcardListener + use<> {
        let log = self.clone();
        move |_: &Envelope<'_>| -> BusResult {
            log.record(name);
            Ok(())
        }
    }

    /// A wildcard listener that records `name` and fails with `error`.
    pub fn failing_wildcard(
        &self,
        name: &'static str,
        error: &'static str,
    ) -> impl WildcardListener + use<> {
        let log = self.clone();
        move |_: &Envelope<'_>| -> BusResult {
            log.record(name);
            Err(error.into())
        }
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and succeeds.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// bus.add_handler::<CreateUser, _>(counter.clone());
///
/// bus.dispatch(&mut CreateUser::default())?;
///
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<M: Message> Handler<M> for CountingHandler {
    fn handle(&self, _msg: &mut M) -> BusResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
