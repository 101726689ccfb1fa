//! # Request/Response Layer (Handler)
//!
//! A handler is the single endpoint bound to a command or query type. The
//! bus routes every dispatched message of that type to exactly one handler.
//!
//! Handlers receive the message mutably: a query handler answers by writing
//! its result into the message, which the caller reads back after dispatch.
//!
//! # Calling Conventions
//!
//! - [`Handler`] - `fn(&mut M) -> BusResult`
//! - [`CtxHandler`] - `fn(&Context, &mut M) -> BusResult`, for handlers that
//!   honour cancellation, deadlines or request-scoped values
//!
//! The message type is taken from the handler's own parameter type, so
//! registration never needs a separate type tag:
//!
//! ```rust,ignore
//! fn create_user(cmd: &mut CreateUser) -> BusResult { ... }
//!
//! bus.add_handler(create_user); // routed by `CreateUser`
//! ```

use crate::{context::Context, error::BusResult, message::Message};

/// The single endpoint for a command or query type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle messages of type `{M}`",
    label = "expected `fn(&mut {M}) -> BusResult`",
    note = "Handlers take the message by `&mut` and return `Result<(), BoxError>`. \
            For the context-aware convention use `add_ctx_handler`."
)]
pub trait Handler<M: Message>: Send + Sync + 'static {
    /// Handle the message.
    fn handle(&self, msg: &mut M) -> BusResult;
}

impl<F, M> Handler<M> for F
where
    M: Message,
    F: Fn(&mut M) -> BusResult + Send + Sync + 'static,
{
    fn handle(&self, msg: &mut M) -> BusResult {
        (self)(msg)
    }
}

/// A handler that also receives the caller's [`Context`].
///
/// The bus passes the context through untouched; it is up to the handler to
/// check [`Context::err`] or read values from it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle messages of type `{M}` with a context",
    label = "expected `fn(&Context, &mut {M}) -> BusResult`",
    note = "Context handlers take `&Context` first, then the message by `&mut`."
)]
pub trait CtxHandler<M: Message>: Send + Sync + 'static {
    /// Handle the message with the caller's context.
    fn handle(&self, ctx: &Context, msg: &mut M) -> BusResult;
}

impl<F, M> CtxHandler<M> for F
where
    M: Message,
    F: Fn(&Context, &mut M) -> BusResult + Send + Sync + 'static,
{
    fn handle(&self, ctx: &Context, msg: &mut M) -> BusResult {
        (self)(ctx, msg)
    }
}
