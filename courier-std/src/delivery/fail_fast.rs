use super::{DeliveryStrategy, Recipient};
use crate::log::bus_debug;
use courier_core::{BusError, Message};

/// A fail-fast delivery strategy.
///
/// Invokes recipients one by one and returns the first error as
/// [`BusError::Listener`]. Recipients after the failing one, including every
/// wildcard listener when a typed listener fails, are not invoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFast;

impl DeliveryStrategy for FailFast {
    fn deliver<'a, E, I>(&self, event: &E, recipients: I) -> Result<(), BusError>
    where
        E: Message,
        I: Iterator<Item = Recipient<'a, E>>,
    {
        for recipient in recipients {
            if let Err(err) = recipient.notify(event) {
                bus_debug!(
                    event = std::any::type_name::<E>(),
                    wildcard = recipient.is_wildcard(),
                    error = %err,
                    "listener failed, stopping delivery"
                );
                return Err(BusError::Listener(err));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::OrderLog;
    use courier_core::{Listener, WildcardListener};

    struct Saved;
    impl Message for Saved {}

    #[test]
    fn stops_at_first_failure() {
        let log = OrderLog::new();
        let first = log.listener::<Saved>("first");
        let broken = log.failing_listener::<Saved>("broken", "disk full");
        let never = log.listener::<Saved>("never");
        let wildcard = log.wildcard("wildcard");

        let recipients = vec![
            Recipient::Listener(&first as &dyn Listener<Saved>),
            Recipient::Listener(&broken as &dyn Listener<Saved>),
            Recipient::Listener(&never as &dyn Listener<Saved>),
            Recipient::Wildcard(&wildcard as &dyn WildcardListener),
        ];

        let err = FailFast.deliver(&Saved, recipients.into_iter()).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(log.entries(), vec!["first", "broken"]);
    }

    #[test]
    fn empty_delivery_succeeds() {
        let recipients: Vec<Recipient<'_, Saved>> = Vec::new();
        assert!(FailFast.deliver(&Saved, recipients.into_iter()).is_ok());
    }
}
