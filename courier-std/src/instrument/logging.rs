//! Logging listener - observability for published events.

use courier_core::{BusResult, Envelope, WildcardListener};

/// A wildcard listener that logs every published event.
///
/// Register it last if it should only see events every other listener
/// accepted, or first (as the only wildcard, before any failing wildcard)
/// to see everything.
///
/// # Example
///
/// ```rust,ignore
/// let bus = Bus::builder()
///     .listener(send_welcome_mail)
///     .wildcard(LoggingListener::named("audit"))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingListener {
    name: &'static str,
}

impl LoggingListener {
    /// Create a new `LoggingListener` with a default name.
    pub fn new() -> Self {
        Self { name: "bus" }
    }

    /// Create a new `LoggingListener` with a custom name.
    ///
    /// The name is used in log messages to identify the bus.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl WildcardListener for LoggingListener {
    fn on_any(&self, envelope: &Envelope<'_>) -> BusResult {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                bus = %self.name,
                event = envelope.key().short_name(),
                type_name = envelope.name(),
                "event published"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = envelope;
        }

        Ok(())
    }
}
