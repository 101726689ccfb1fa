//! The process-wide default bus.
//!
//! A convenience for applications that don't want to thread a [`Bus`]
//! through their code. Everything here forwards to one lazily created bus
//! guarded by a read-write lock:
//!
//! - registration takes the write lock,
//! - dispatch and publish take a recursive read lock, so a handler may
//!   dispatch or publish further messages through the global bus.
//!
//! A handler invoked through the global bus must not register into it: the
//! write lock would wait on the read lock held by its own call.
//!
//! Prefer an explicit [`Bus`] wherever possible; tests in particular should
//! build their own instance instead of sharing this one.

use crate::bus::Bus;
use courier_core::{BusError, Context, CtxHandler, Handler, Listener, Message, WildcardListener};
use parking_lot::RwLock;
use std::sync::LazyLock;

static BUS: LazyLock<RwLock<Bus>> = LazyLock::new(|| RwLock::new(Bus::new()));

/// Register the handler for `M` on the global bus.
pub fn add_handler<M, H>(handler: H)
where
    M: Message,
    H: Handler<M>,
{
    BUS.write().add_handler(handler);
}

/// Register the context-aware handler for `M` on the global bus.
pub fn add_ctx_handler<M, H>(handler: H)
where
    M: Message,
    H: CtxHandler<M>,
{
    BUS.write().add_ctx_handler(handler);
}

/// Append a listener for `E` on the global bus.
pub fn add_event_listener<E, L>(listener: L)
where
    E: Message,
    L: Listener<E>,
{
    BUS.write().add_event_listener(listener);
}

/// Append a wildcard listener on the global bus.
pub fn add_wildcard_listener<W: WildcardListener>(listener: W) {
    BUS.write().add_wildcard_listener(listener);
}

/// Dispatch `msg` through the global bus. See [`Bus::dispatch`].
pub fn dispatch<M: Message>(msg: &mut M) -> Result<(), BusError> {
    BUS.read_recursive().dispatch(msg)
}

/// Dispatch `msg` with a context through the global bus. See
/// [`Bus::dispatch_ctx`].
pub fn dispatch_ctx<M: Message>(ctx: &Context, msg: &mut M) -> Result<(), BusError> {
    BUS.read_recursive().dispatch_ctx(ctx, msg)
}

/// Publish `event` through the global bus. See [`Bus::publish`].
pub fn publish<E: Message>(event: &E) -> Result<(), BusError> {
    BUS.read_recursive().publish(event)
}

/// Run `f` with read access to the global bus.
pub fn with_bus<R>(f: impl FnOnce(&Bus) -> R) -> R {
    f(&BUS.read_recursive())
}

/// Discard the global bus and start over with an empty one.
pub fn reset() {
    *BUS.write() = Bus::new();
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::BusResult;

    // The only unit test in this crate that uses the global bus.
    struct Lookup {
        key: &'static str,
        value: Option<String>,
    }
    impl Message for Lookup {}

    struct Resolve {
        answer: Option<String>,
    }
    impl Message for Resolve {}

    #[test]
    fn global_bus_round_trip_and_reset() {
        reset();

        add_handler(|query: &mut Lookup| -> BusResult {
            query.value = Some(format!("{}=1", query.key));
            Ok(())
        });
        // Nested dispatch through the global bus from inside a handler.
        add_handler(|query: &mut Resolve| -> BusResult {
            let mut lookup = Lookup { key: "org", value: None };
            dispatch(&mut lookup)?;
            query.answer = lookup.value;
            Ok(())
        });

        let mut query = Resolve { answer: None };
        dispatch(&mut query).unwrap();
        assert_eq!(query.answer.as_deref(), Some("org=1"));
        assert!(with_bus(|bus| bus.has_handler::<Lookup>()));

        reset();
        let err = dispatch(&mut Resolve { answer: None }).unwrap_err();
        assert!(err.is_handler_not_found());
        assert!(with_bus(Bus::is_empty));
    }
}
