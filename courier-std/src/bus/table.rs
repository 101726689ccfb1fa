//! The routing table behind a [`Bus`](super::Bus).
//!
//! Three independent mappings:
//!
//! - one handler slot per message type,
//! - an ordered listener list per event type,
//! - one ordered wildcard list.
//!
//! Entries are stored type-erased and recovered with the same
//! [`MessageKey`] they were inserted under, so a downcast on the read path
//! cannot fail.

use courier_core::{
    BusResult, Context, CtxHandler, Handler, Listener, Message, MessageKey, WildcardListener,
};
use std::{any::Any, collections::HashMap};

type Erased = Box<dyn Any + Send + Sync>;

/// The single handler registered for a message type, in either calling
/// convention.
pub(crate) enum HandlerSlot<M: Message> {
    Plain(Box<dyn Handler<M>>),
    WithContext(Box<dyn CtxHandler<M>>),
}

impl<M: Message> HandlerSlot<M> {
    /// Invoke the handler.
    ///
    /// A plain handler ignores the context; a context handler called without
    /// one gets a background context.
    pub(crate) fn call(&self, ctx: Option<&Context>, msg: &mut M) -> BusResult {
        match (self, ctx) {
            (HandlerSlot::Plain(handler), _) => handler.handle(msg),
            (HandlerSlot::WithContext(handler), Some(ctx)) => handler.handle(ctx, msg),
            (HandlerSlot::WithContext(handler), None) => {
                handler.handle(&Context::background(), msg)
            }
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            HandlerSlot::Plain(_) => "handler",
            HandlerSlot::WithContext(_) => "ctx_handler",
        }
    }
}

#[derive(Default)]
pub(crate) struct RoutingTable {
    handlers: HashMap<MessageKey, Erased>,
    listeners: HashMap<MessageKey, Vec<Erased>>,
    wildcards: Vec<Box<dyn WildcardListener>>,
}

impl RoutingTable {
    /// Store `slot`, returning `true` if it replaced an existing handler.
    pub(crate) fn insert_handler<M: Message>(&mut self, slot: HandlerSlot<M>) -> bool {
        self.handlers
            .insert(MessageKey::of::<M>(), Box::new(slot))
            .is_some()
    }

    pub(crate) fn handler<M: Message>(&self) -> Option<&HandlerSlot<M>> {
        self.handlers
            .get(&MessageKey::of::<M>())
            .and_then(|slot| slot.downcast_ref::<HandlerSlot<M>>())
    }

    pub(crate) fn contains_handler(&self, key: &MessageKey) -> bool {
        self.handlers.contains_key(key)
    }

    pub(crate) fn push_listener<E, L>(&mut self, listener: L)
    where
        E: Message,
        L: Listener<E>,
    {
        let listener: Box<dyn Listener<E>> = Box::new(listener);
        self.listeners
            .entry(MessageKey::of::<E>())
            .or_default()
            .push(Box::new(listener));
    }

    pub(crate) fn push_wildcard<W: WildcardListener>(&mut self, listener: W) {
        self.wildcards.push(Box::new(listener));
    }

    /// Listeners for `E` in registration order.
    pub(crate) fn listeners<E: Message>(&self) -> impl Iterator<Item = &dyn Listener<E>> {
        self.listeners
            .get(&MessageKey::of::<E>())
            .into_iter()
            .flatten()
            .filter_map(|listener| listener.downcast_ref::<Box<dyn Listener<E>>>())
            .map(|listener| listener.as_ref())
    }

    /// Wildcard listeners in registration order.
    pub(crate) fn wildcards(&self) -> impl Iterator<Item = &dyn WildcardListener> {
        self.wildcards.iter().map(|listener| listener.as_ref())
    }

    pub(crate) fn listener_count(&self, key: &MessageKey) -> usize {
        self.listeners.get(key).map_or(0, Vec::len)
    }

    pub(crate) fn wildcard_count(&self) -> usize {
        self.wildcards.len()
    }

    pub(crate) fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub(crate) fn handler_keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.handlers.keys()
    }

    pub(crate) fn event_keys(&self) -> impl Iterator<Item = &MessageKey> {
        self.listeners.keys()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.listeners.is_empty() && self.wildcards.is_empty()
    }
}
