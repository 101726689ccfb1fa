//! Builder for constructing a [`Bus`].

use super::{Bus, BusConfig, DuplicatePolicy};
use courier_core::{CtxHandler, Handler, Listener, Message, WildcardListener};

/// Builder for constructing a Bus.
///
/// Register everything during startup, then call `.build()` and share the
/// result (e.g. in an `Arc`). Set the duplicate policy first: it applies to
/// handlers registered after it.
///
/// # Example
/// ```ignore
/// let bus = Bus::builder()
///     .on_duplicate(DuplicatePolicy::Panic)
///     .handler(create_user)
///     .ctx_handler(get_dashboard)
///     .listener(send_welcome_mail)
///     .wildcard(LoggingListener::new())
///     .build();
/// ```
#[derive(Default)]
pub struct BusBuilder {
    bus: Bus,
}

impl BusBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: BusConfig) -> Self {
        self.bus.config = config;
        self
    }

    /// Set the duplicate handler policy.
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.bus.config.duplicate_policy = policy;
        self
    }

    /// Register a handler.
    pub fn handler<M, H>(mut self, handler: H) -> Self
    where
        M: Message,
        H: Handler<M>,
    {
        self.bus.add_handler(handler);
        self
    }

    /// Register a context-aware handler.
    pub fn ctx_handler<M, H>(mut self, handler: H) -> Self
    where
        M: Message,
        H: CtxHandler<M>,
    {
        self.bus.add_ctx_handler(handler);
        self
    }

    /// Register an event listener.
    pub fn listener<E, L>(mut self, listener: L) -> Self
    where
        E: Message,
        L: Listener<E>,
    {
        self.bus.add_event_listener(listener);
        self
    }

    /// Register a wildcard listener.
    pub fn wildcard<W: WildcardListener>(mut self, listener: W) -> Self {
        self.bus.add_wildcard_listener(listener);
        self
    }

    /// Build the bus.
    pub fn build(self) -> Bus {
        self.bus
    }
}
