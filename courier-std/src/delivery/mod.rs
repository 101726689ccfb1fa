//! Delivery strategies for published events.
//!
//! A strategy receives the event and its recipients (typed listeners first,
//! then wildcard listeners, each in registration order) and decides how
//! failures affect the rest of the delivery.
//!
//! - [`FailFast`] - stop at the first failure (what [`Bus::publish`] uses)
//! - [`CollectAll`] - invoke everyone, aggregate the failures
//!
//! [`Bus::publish`]: crate::Bus::publish

mod collect;
mod fail_fast;

pub use collect::CollectAll;
pub use fail_fast::FailFast;

use courier_core::{BusError, BusResult, Envelope, Listener, Message, WildcardListener};

/// One recipient of a published event.
pub enum Recipient<'a, E: Message> {
    /// A listener registered for the event's type.
    Listener(&'a dyn Listener<E>),
    /// A listener registered for every event.
    Wildcard(&'a dyn WildcardListener),
}

impl<E: Message> Recipient<'_, E> {
    /// Deliver the event to this recipient.
    pub fn notify(&self, event: &E) -> BusResult {
        match self {
            Recipient::Listener(listener) => listener.on_event(event),
            Recipient::Wildcard(listener) => listener.on_any(&Envelope::new(event)),
        }
    }

    /// Returns `true` for wildcard recipients.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Recipient::Wildcard(_))
    }
}

/// Strategy for delivering an event to a resolved set of recipients.
///
/// This abstraction allows different failure semantics to be plugged into
/// [`Bus::publish_with`](crate::Bus::publish_with).
pub trait DeliveryStrategy: Send + Sync {
    /// Deliver the event to the recipients, in iteration order.
    fn deliver<'a, E, I>(&self, event: &E, recipients: I) -> Result<(), BusError>
    where
        E: Message,
        I: Iterator<Item = Recipient<'a, E>>;
}
