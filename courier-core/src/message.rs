//! Message trait and routing keys.

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

/// A marker trait for commands, queries and events carried by the bus.
///
/// The routing identity of a message is its type, never its contents.
/// Messages must be `Send + Sync + 'static` so a bus can be shared across
/// threads.
///
/// # Example
///
/// ```rust,ignore
/// struct CreateUser { name: String }
///
/// impl Message for CreateUser {}
/// ```
///
/// Smart pointers and containers are not messages. Routing is by the exact
/// type, so an `Arc<UserCreated>` would never reach `UserCreated` listeners;
/// publish the inner value instead:
///
/// ```compile_fail
/// use courier_core::{Envelope, Message};
///
/// struct UserCreated;
/// impl Message for UserCreated {}
///
/// let event = std::sync::Arc::new(UserCreated);
/// let _ = Envelope::new(&event);
/// ```
///
/// ```compile_fail
/// use courier_core::{Message, MessageKey};
///
/// struct CreateUser;
/// impl Message for CreateUser {}
///
/// let _ = MessageKey::of::<Box<CreateUser>>();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must implement `Message` (derive it or add `impl Message for {Self} {{}}`)",
    note = "Messages must be `Send + Sync + 'static`."
)]
pub trait Message: Any + Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for String {}
impl Message for &'static str {}

/// The routing key of a message type.
///
/// Equality and hashing only consider the [`TypeId`]; the type name is kept
/// for diagnostics. Keys are only ever produced by [`MessageKey::of`], so the
/// key computed at registration always matches the one computed at dispatch.
#[derive(Clone, Copy)]
pub struct MessageKey {
    id: TypeId,
    name: &'static str,
}

impl MessageKey {
    /// The key for message type `M`.
    pub fn of<M: Message>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: std::any::type_name::<M>(),
        }
    }

    /// The underlying type id.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type name without its module path or generic arguments.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for MessageKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageKey {}

impl Hash for MessageKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageKey").field(&self.name).finish()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased view of a published event.
///
/// Wildcard listeners observe every event type, so they receive the event
/// through an envelope and downcast when they care about a specific type.
#[derive(Clone, Copy)]
pub struct Envelope<'a> {
    key: MessageKey,
    event: &'a (dyn Any + Send + Sync),
}

impl<'a> Envelope<'a> {
    /// Wrap a typed event.
    pub fn new<E: Message>(event: &'a E) -> Self {
        Self {
            key: MessageKey::of::<E>(),
            event,
        }
    }

    /// The routing key of the wrapped event.
    pub fn key(&self) -> MessageKey {
        self.key
    }

    /// Shorthand for `self.key().name()`.
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Returns `true` if the wrapped event is an `E`.
    pub fn is<E: Message>(&self) -> bool {
        self.event.is::<E>()
    }

    /// Borrow the wrapped event as an `E`, if it is one.
    pub fn downcast_ref<E: Message>(&self) -> Option<&'a E> {
        self.event.downcast_ref::<E>()
    }
}

impl fmt::Debug for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nested {
        pub struct Ping;
        impl crate::Message for Ping {}

        pub struct Wrapper<T>(pub T);
        impl<T: crate::Message> crate::Message for Wrapper<T> {}
    }

    use nested::{Ping, Wrapper};

    #[test]
    fn keys_compare_by_type() {
        assert_eq!(MessageKey::of::<Ping>(), MessageKey::of::<Ping>());
        assert_ne!(MessageKey::of::<Ping>(), MessageKey::of::<String>());
    }

    #[test]
    fn short_name_strips_path_and_generics() {
        assert_eq!(MessageKey::of::<Ping>().short_name(), "Ping");
        assert_eq!(MessageKey::of::<Wrapper<Ping>>().short_name(), "Wrapper");
        assert!(MessageKey::of::<Ping>().name().ends_with("nested::Ping"));
    }

    #[test]
    fn envelope_downcasts_to_original_type() {
        let ping = Ping;
        let envelope = Envelope::new(&ping);

        assert!(envelope.is::<Ping>());
        assert!(!envelope.is::<String>());
        assert!(envelope.downcast_ref::<Ping>().is_some());
        assert!(envelope.downcast_ref::<String>().is_none());
        assert_eq!(envelope.key(), MessageKey::of::<Ping>());
    }
}
