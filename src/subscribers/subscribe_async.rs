//! # Asynchronous subscriber contract
//!
//! A dispatcher carries at most **one** asynchronous subscriber. The async
//! path is deliberately narrow: `dispatch_async` hands the action to this
//! single subscriber directly, with no queueing, no ordering relationship to
//! the queued path, and an error when the slot is empty. It is a dedicated
//! notification channel, not a second fan-out.
//!
//! ## Implementing
//! ```rust
//! use async_trait::async_trait;
//! use dispatchq::{AnyAction, SubscribeAsync, SubscriberError};
//!
//! struct Effects;
//!
//! #[async_trait]
//! impl SubscribeAsync for Effects {
//!     async fn on_action(&self, _action: AnyAction) -> Result<(), SubscriberError> {
//!         // run side effects (I/O, timers, ...)
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "effects"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::actions::AnyAction;
use crate::error::SubscriberError;

/// Contract for the single asynchronous subscriber.
///
/// The returned future is awaited by the `dispatch_async` caller; the
/// dispatcher's lock is released before the call, so implementations may
/// dispatch queued actions from inside the handler.
#[async_trait]
pub trait SubscribeAsync: Send + Sync + 'static {
    /// Handles one action delivered through the async path.
    ///
    /// Receives the action by value (shared `Arc`); the completion of the
    /// returned future is the caller's completion signal.
    async fn on_action(&self, action: AnyAction) -> Result<(), SubscriberError>;

    /// Human-readable name (used in error values and logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
