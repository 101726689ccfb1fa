//! # Broadcast Layer (Listener)
//!
//! Listeners observe published events. Any number of listeners may be bound
//! to one event type; they are invoked in registration order, followed by
//! every [`WildcardListener`].
//!
//! Listeners only borrow the event, so one published value is shared by all
//! of them without cloning.

use crate::{
    error::BusResult,
    message::{Envelope, Message},
};

/// An observer of one event type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for `{E}`",
    label = "expected `fn(&{E}) -> BusResult`",
    note = "Listeners borrow the event and return `Result<(), BoxError>`."
)]
pub trait Listener<E: Message>: Send + Sync + 'static {
    /// Called for every published `E`.
    fn on_event(&self, event: &E) -> BusResult;
}

impl<F, E> Listener<E> for F
where
    E: Message,
    F: Fn(&E) -> BusResult + Send + Sync + 'static,
{
    fn on_event(&self, event: &E) -> BusResult {
        (self)(event)
    }
}

/// An observer of every published event, whatever its type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `WildcardListener`",
    label = "expected `fn(&Envelope<'_>) -> BusResult`",
    note = "Wildcard listeners receive a type-erased `Envelope`; use `downcast_ref` to inspect it."
)]
pub trait WildcardListener: Send + Sync + 'static {
    /// Called for every published event.
    fn on_any(&self, envelope: &Envelope<'_>) -> BusResult;
}

impl<F> WildcardListener for F
where
    F: Fn(&Envelope<'_>) -> BusResult + Send + Sync + 'static,
{
    fn on_any(&self, envelope: &Envelope<'_>) -> BusResult {
        (self)(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    struct UserCreated {
        id: u64,
    }
    impl Message for UserCreated {}

    #[test]
    fn closures_are_listeners() {
        let seen = Arc::new(AtomicU64::new(0));
        let sink = seen.clone();
        let listener = move |event: &UserCreated| -> BusResult {
            sink.store(event.id, Ordering::SeqCst);
            Ok(())
        };

        listener.on_event(&UserCreated { id: 42 }).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 42);
    }

    #[test]
    fn wildcard_listener_can_downcast() {
        let seen = Arc::new(AtomicU64::new(0));
        let sink = seen.clone();
        let wildcard = move |envelope: &Envelope<'_>| -> BusResult {
            if let Some(event) = envelope.downcast_ref::<UserCreated>() {
                sink.store(event.id, Ordering::SeqCst);
            }
            Ok(())
        };

        let event = UserCreated { id: 9 };
        wildcard.on_any(&Envelope::new(&event)).unwrap();
        wildcard.on_any(&Envelope::new(&String::from("other"))).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }
}
