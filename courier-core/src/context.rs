//! # Call Context
//!
//! The cancellation, deadline and request-scoped values handed to a
//! [`CtxHandler`](crate::CtxHandler) by `dispatch_ctx`.
//!
//! The bus treats the context as an opaque pass-through value: it never
//! checks cancellation or deadlines itself. Handlers decide whether and when
//! to honour them, usually by returning early when [`Context::err`] is set.
//!
//! Contexts form a tree. Every derived context (`with_cancel`,
//! `with_deadline`, `with_timeout`, `with_value`) is cancelled when its
//! parent is, inherits the parent's values, and never has a later deadline
//! than its parent. Cancelling a child leaves the parent untouched.
//!
//! ```rust,ignore
//! let ctx = Context::background()
//!     .with_timeout(Duration::from_secs(2))
//!     .with_value(RequestId(17));
//!
//! bus.dispatch_ctx(&ctx, &mut GetDashboard { uid: "abc".into() })?;
//! ```

use crate::error::ContextError;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio_util::sync::CancellationToken;

type Values = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Cancellation signal, deadline and typed values for one call.
///
/// Cloning is cheap and clones share cancellation state.
#[derive(Clone, Default)]
pub struct Context {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    token: CancellationToken,
    deadline: Option<Instant>,
    values: Values,
}

impl Context {
    /// A root context: never cancelled unless [`cancel`](Self::cancel) is
    /// called on it, no deadline, no values.
    pub fn background() -> Self {
        Self::default()
    }

    fn derive(&self, deadline: Option<Instant>, values: Values) -> Self {
        Self {
            inner: Arc::new(Inner {
                token: self.inner.token.child_token(),
                deadline,
                values,
            }),
        }
    }

    /// A child context that can be cancelled independently of its parent.
    pub fn with_cancel(&self) -> Self {
        self.derive(self.inner.deadline, self.inner.values.clone())
    }

    /// A child context that expires at `deadline`, or at the parent's
    /// deadline if that is earlier.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.inner.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        self.derive(Some(deadline), self.inner.values.clone())
    }

    /// A child context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an [`Instant`] sets no deadline of
    /// its own; the child keeps the parent's.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.with_cancel(),
        }
    }

    /// A child context carrying `value`, replacing any inherited value of the
    /// same type.
    pub fn with_value<T: Send + Sync + 'static>(&self, value: T) -> Self {
        let mut values = self.inner.values.clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        self.derive(self.inner.deadline, values)
    }

    /// The value of type `T`, if this context or an ancestor carries one.
    pub fn value<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner
            .values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Cancel this context and every context derived from it.
    pub fn cancel(&self) {
        self.inner.token.cancel();
    }

    /// Returns `true` once this context or an ancestor has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline; zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Why this context is done, or `None` if it is still live.
    ///
    /// Cancellation takes precedence over an expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves when this context is cancelled.
    ///
    /// Deadlines do not resolve this future; combine it with a timer if the
    /// caller needs both.
    pub async fn cancelled(&self) {
        self.inner.token.cancelled().await;
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.inner.token
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.inner.deadline)
            .field("values", &self.inner.values.len())
            .finish()
    }
}
