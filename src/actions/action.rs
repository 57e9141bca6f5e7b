//! # Type-erased action values.
//!
//! The dispatcher treats actions as opaque payloads: any `Send + Sync + 'static`
//! value qualifies, and one delivered action is shared by every subscriber in
//! the snapshot for that delivery. [`AnyAction`] captures both properties as
//! `Arc<dyn Any + Send + Sync>`.
//!
//! Subscribers recover the concrete type with `downcast_ref`:
//!
//! ```rust
//! use dispatchq::{erase, AnyAction};
//!
//! struct AddTodo { title: String }
//!
//! let action: AnyAction = erase(AddTodo { title: "water plants".into() });
//! let add = action.downcast_ref::<AddTodo>().expect("wrong action type");
//! assert_eq!(add.title, "water plants");
//! ```

use std::any::Any;
use std::sync::Arc;

/// Type-erased, shared action value.
///
/// Cloning is cheap (`Arc`); subscribers receive a reference and must not
/// assume exclusive access: the same value is shared across every subscriber
/// of one delivery.
pub type AnyAction = Arc<dyn Any + Send + Sync>;

/// Erases a concrete action into an [`AnyAction`].
///
/// Useful together with the `*_arc` dispatch variants when the same action
/// value is shared or re-dispatched; the generic dispatch methods call this
/// internally.
pub fn erase<A>(action: A) -> AnyAction
where
    A: Send + Sync + 'static,
{
    Arc::new(action)
}
