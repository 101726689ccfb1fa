//! Procedural macros for courier.
//!
//! - `#[derive(Message)]` - implement the `Message` marker trait

mod message;

use proc_macro::TokenStream;

/// Derive macro for implementing the `Message` trait.
///
/// The generated impl names `::courier::Message`. Crates that depend on
/// `courier-core` directly can point the derive at it instead:
///
/// ```rust,ignore
/// #[derive(Message)]
/// #[message(crate = courier_core)]
/// struct UserCreated { id: u64 }
/// ```
///
/// Each type parameter gets a `Send + Sync + 'static` bound on the generated
/// impl so the marker's supertraits hold.
#[proc_macro_derive(Message, attributes(message))]
pub fn derive_message(input: TokenStream) -> TokenStream {
    message::derive_message_impl(input)
}
