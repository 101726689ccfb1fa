use courier_core::{BusResult, Context, CtxHandler, Handler, Listener, Message};

/// A wrapper that instruments a handler or listener with a `tracing` span.
///
/// The span is named after the wrapper, records the message type, and a
/// failure is logged at `debug` before the error is returned unchanged.
///
/// ```rust,ignore
/// bus.add_handler(Traced::new(create_user, "create_user"));
/// bus.add_event_listener(Traced::new(send_welcome_mail, "welcome_mail"));
/// ```
pub struct Traced<H> {
    inner: H,
    name: &'static str,
}

impl<H> Traced<H> {
    /// Wrap `inner`, labelling its span with `name`.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped handler or listener.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// The span label.
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(feature = "tracing")]
    fn instrument<M: Message>(&self, call: impl FnOnce() -> BusResult) -> BusResult {
        let span = tracing::info_span!(
            "courier",
            name = %self.name,
            message = std::any::type_name::<M>()
        );
        let _entered = span.enter();

        let result = call();
        if let Err(err) = &result {
            tracing::debug!(error = %err, "call failed");
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn instrument<M: Message>(&self, call: impl FnOnce() -> BusResult) -> BusResult {
        call()
    }
}

impl<H: Clone> Clone for Traced<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<M, H> Handler<M> for Traced<H>
where
    M: Message,
    H: Handler<M>,
{
    fn handle(&self, msg: &mut M) -> BusResult {
        self.instrument::<M>(|| self.inner.handle(msg))
    }
}

impl<M, H> CtxHandler<M> for Traced<H>
where
    M: Message,
    H: CtxHandler<M>,
{
    fn handle(&self, ctx: &Context, msg: &mut M) -> BusResult {
        self.instrument::<M>(|| self.inner.handle(ctx, msg))
    }
}

impl<E, H> Listener<E> for Traced<H>
where
    E: Message,
    H: Listener<E>,
{
    fn on_event(&self, event: &E) -> BusResult {
        self.instrument::<E>(|| self.inner.on_event(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rename {
        name: String,
    }
    impl Message for Rename {}

    fn rename(msg: &mut Rename) -> BusResult {
        if msg.name.is_empty() {
            return Err("empty name".into());
        }
        msg.name = msg.name.to_uppercase();
        Ok(())
    }

    #[test]
    fn traced_handler_is_transparent() {
        let traced = Traced::new(rename, "rename");
        assert_eq!(traced.name(), "rename");

        let mut msg = Rename { name: "grafana".into() };
        Handler::handle(&traced, &mut msg).unwrap();
        assert_eq!(msg.name, "GRAFANA");

        let mut empty = Rename { name: String::new() };
        let err = Handler::handle(&traced, &mut empty).unwrap_err();
        assert_eq!(err.to_string(), "empty name");
    }

    #[test]
    fn traced_listener_forwards_event() {
        let traced = Traced::new(
            |event: &Rename| -> BusResult {
                assert_eq!(event.name, "x");
                Ok(())
            },
            "check",
        );
        assert!(traced.on_event(&Rename { name: "x".into() }).is_ok());
    }
}
