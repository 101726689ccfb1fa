use super::{DeliveryStrategy, Recipient};
use crate::log::bus_debug;
use courier_core::{BoxError, BusError, Message};

/// A delivery strategy that isolates listener failures.
///
/// Every recipient is invoked regardless of earlier failures. If any failed,
/// the failures are returned together as [`BusError::Listeners`], in
/// invocation order. Unlike [`FailFast`](super::FailFast), one broken
/// listener cannot hide the event from the others.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectAll;

impl DeliveryStrategy for CollectAll {
    fn deliver<'a, E, I>(&self, event: &E, recipients: I) -> Result<(), BusError>
    where
        E: Message,
        I: Iterator<Item = Recipient<'a, E>>,
    {
        let errors: Vec<BoxError> = recipients
            .filter_map(|recipient| recipient.notify(event).err())
            .collect();

        if errors.is_empty() {
            return Ok(());
        }

        bus_debug!(
            event = std::any::type_name::<E>(),
            failures = errors.len(),
            "listeners failed"
        );
        Err(BusError::Listeners {
            event: std::any::type_name::<E>(),
            errors,
        })
    }
}
