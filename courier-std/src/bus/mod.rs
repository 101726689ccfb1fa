//! The message bus.
//!
//! A [`Bus`] owns one routing table and exposes both delivery disciplines:
//!
//! - **dispatch**: one handler per message type, its result returned as-is
//! - **publish**: every listener for the event type, then every wildcard
//!   listener, in registration order
//!
//! Registration takes `&mut self` and dispatch takes `&self`, so a bus is
//! populated during startup and then shared read-only (typically behind an
//! `Arc`) without any lock on the dispatch path.

mod builder;
pub(crate) mod table;

pub use builder::BusBuilder;

use crate::{
    delivery::{CollectAll, DeliveryStrategy, FailFast, Recipient},
    log::{bus_debug, bus_trace, bus_warn},
};
use courier_core::{
    BusError, Context, CtxHandler, Handler, Listener, Message, MessageKey, RegistrationError,
    WildcardListener,
};
use std::fmt;
use table::{HandlerSlot, RoutingTable};

/// What happens when a handler is registered for a message type that
/// already has one.
///
/// Every policy except [`Panic`](Self::Panic) keeps "last registration
/// wins".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Replace the previous handler silently.
    Replace,
    /// Replace the previous handler and log a warning.
    #[default]
    Warn,
    /// Panic: duplicate registration is a startup bug.
    Panic,
}

/// Bus configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusConfig {
    /// Behaviour on duplicate handler registration.
    pub duplicate_policy: DuplicatePolicy,
}

impl BusConfig {
    /// Set the duplicate policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// An in-process message bus.
///
/// # Example
///
/// ```rust,ignore
/// let mut bus = Bus::new();
/// bus.add_handler(|cmd: &mut CreateUser| -> BusResult { ... });
/// bus.add_event_listener(|event: &UserCreated| -> BusResult { ... });
///
/// bus.dispatch(&mut CreateUser { name: "a".into() })?;
/// bus.publish(&UserCreated { id: 1 })?;
/// ```
#[derive(Default)]
pub struct Bus {
    table: RoutingTable,
    config: BusConfig,
}

impl Bus {
    /// Create an empty bus with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            table: RoutingTable::default(),
            config,
        }
    }

    /// Start building a bus.
    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    /// The bus configuration.
    pub fn config(&self) -> BusConfig {
        self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register the handler for message type `M`.
    ///
    /// `M` is taken from the handler's parameter type. An existing handler
    /// for `M` (either calling convention) is replaced according to the
    /// bus's [`DuplicatePolicy`].
    pub fn add_handler<M, H>(&mut self, handler: H)
    where
        M: Message,
        H: Handler<M>,
    {
        self.insert_handler(HandlerSlot::<M>::Plain(Box::new(handler)));
    }

    /// Register the context-aware handler for message type `M`.
    ///
    /// Shares the handler slot with [`add_handler`](Self::add_handler): one
    /// message type has one handler, whichever convention it uses.
    pub fn add_ctx_handler<M, H>(&mut self, handler: H)
    where
        M: Message,
        H: CtxHandler<M>,
    {
        self.insert_handler(HandlerSlot::<M>::WithContext(Box::new(handler)));
    }

    /// Register the handler for `M`, failing if one is already registered.
    pub fn try_add_handler<M, H>(&mut self, handler: H) -> Result<(), RegistrationError>
    where
        M: Message,
        H: Handler<M>,
    {
        self.ensure_vacant::<M>()?;
        self.add_handler(handler);
        Ok(())
    }

    /// Register the context-aware handler for `M`, failing if one is already
    /// registered.
    pub fn try_add_ctx_handler<M, H>(&mut self, handler: H) -> Result<(), RegistrationError>
    where
        M: Message,
        H: CtxHandler<M>,
    {
        self.ensure_vacant::<M>()?;
        self.add_ctx_handler(handler);
        Ok(())
    }

    /// Append a listener for event type `E`.
    pub fn add_event_listener<E, L>(&mut self, listener: L)
    where
        E: Message,
        L: Listener<E>,
    {
        self.table.push_listener::<E, L>(listener);
        bus_debug!(
            event = MessageKey::of::<E>().name(),
            listeners = self.table.listener_count(&MessageKey::of::<E>()),
            "registered event listener"
        );
    }

    /// Append a listener invoked for every published event.
    pub fn add_wildcard_listener<W: WildcardListener>(&mut self, listener: W) {
        self.table.push_wildcard(listener);
        bus_debug!(
            wildcards = self.table.wildcard_count(),
            "registered wildcard listener"
        );
    }

    /// Discard every registration.
    pub fn clear(&mut self) {
        self.table = RoutingTable::default();
        bus_debug!("cleared bus");
    }

    fn ensure_vacant<M: Message>(&self) -> Result<(), RegistrationError> {
        let key = MessageKey::of::<M>();
        if self.table.contains_handler(&key) {
            return Err(RegistrationError::DuplicateHandler {
                message: key.name(),
            });
        }
        Ok(())
    }

    fn insert_handler<M: Message>(&mut self, slot: HandlerSlot<M>) {
        let key = MessageKey::of::<M>();
        if self.table.contains_handler(&key) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Replace => {}
                DuplicatePolicy::Warn => {
                    bus_warn!(
                        message = key.name(),
                        "replacing previously registered handler"
                    );
                }
                DuplicatePolicy::Panic => {
                    panic!("{}", RegistrationError::DuplicateHandler { message: key.name() })
                }
            }
        }

        bus_debug!(message = key.name(), kind = slot.kind(), "registered handler");
        self.table.insert_handler(slot);
    }

    // ------------------------------------------------------------------
    // Delivery
    // ------------------------------------------------------------------

    /// Route `msg` to the handler registered for `M`.
    ///
    /// Returns [`BusError::HandlerNotFound`] when there is none, otherwise
    /// the handler's own result. A context handler is given a background
    /// context.
    pub fn dispatch<M: Message>(&self, msg: &mut M) -> Result<(), BusError> {
        let slot = self.slot::<M>()?;
        bus_trace!(message = MessageKey::of::<M>().name(), "dispatch");
        slot.call(None, msg).map_err(BusError::Handler)
    }

    /// Route `msg` to the handler registered for `M`, passing `ctx` through.
    ///
    /// The bus does not look at the context. A plain handler is invoked
    /// without it.
    pub fn dispatch_ctx<M: Message>(&self, ctx: &Context, msg: &mut M) -> Result<(), BusError> {
        let slot = self.slot::<M>()?;
        bus_trace!(message = MessageKey::of::<M>().name(), "dispatch with context");
        slot.call(Some(ctx), msg).map_err(BusError::Handler)
    }

    /// Deliver `event` to its listeners, then to the wildcard listeners.
    ///
    /// Stops at the first failing listener and returns its error; nothing
    /// registered after it is invoked. Publishing an event nobody listens to
    /// succeeds.
    pub fn publish<E: Message>(&self, event: &E) -> Result<(), BusError> {
        self.publish_with(event, &FailFast)
    }

    /// Deliver `event` to every recipient even if some fail.
    ///
    /// All failures are returned together as [`BusError::Listeners`].
    pub fn publish_all<E: Message>(&self, event: &E) -> Result<(), BusError> {
        self.publish_with(event, &CollectAll)
    }

    /// Deliver `event` using a custom delivery strategy.
    pub fn publish_with<E, D>(&self, event: &E, delivery: &D) -> Result<(), BusError>
    where
        E: Message,
        D: DeliveryStrategy,
    {
        bus_trace!(
            event = MessageKey::of::<E>().name(),
            listeners = self.table.listener_count(&MessageKey::of::<E>()),
            wildcards = self.table.wildcard_count(),
            "publish"
        );
        let recipients = self
            .table
            .listeners::<E>()
            .map(Recipient::Listener)
            .chain(self.table.wildcards().map(Recipient::Wildcard));
        delivery.deliver(event, recipients)
    }

    fn slot<M: Message>(&self) -> Result<&HandlerSlot<M>, BusError> {
        self.table.handler::<M>().ok_or_else(|| {
            bus_debug!(message = MessageKey::of::<M>().name(), "handler not found");
            BusError::HandlerNotFound {
                message: MessageKey::of::<M>().name(),
            }
        })
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Returns `true` if a handler is registered for `M`.
    pub fn has_handler<M: Message>(&self) -> bool {
        self.table.contains_handler(&MessageKey::of::<M>())
    }

    /// Number of listeners registered for `E`, excluding wildcards.
    pub fn listener_count<E: Message>(&self) -> usize {
        self.table.listener_count(&MessageKey::of::<E>())
    }

    /// Number of wildcard listeners.
    pub fn wildcard_count(&self) -> usize {
        self.table.wildcard_count()
    }

    /// Number of message types with a handler.
    pub fn handler_count(&self) -> usize {
        self.table.handler_count()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Type names of every message with a handler, sorted.
    pub fn routes(&self) -> Vec<&'static str> {
        let mut routes: Vec<_> = self.table.handler_keys().map(MessageKey::name).collect();
        routes.sort_unstable();
        routes
    }

    /// Type names of every event with at least one listener, sorted.
    pub fn events(&self) -> Vec<&'static str> {
        let mut events: Vec<_> = self.table.event_keys().map(MessageKey::name).collect();
        events.sort_unstable();
        events
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("routes", &self.routes())
            .field("events", &self.events())
            .field("wildcards", &self.table.wildcard_count())
            .field("config", &self.config)
            .finish()
    }
}
