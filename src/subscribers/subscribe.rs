//! # Core synchronous subscriber contract
//!
//! `Subscribe` is the extension point for receiving queued actions. The
//! dispatcher snapshots the registered set before each delivery and invokes
//! every subscriber in registration order, inline, on whichever thread drives
//! the drain loop.
//!
//! ## Contract
//! - Implementations run **synchronously** on a producer's thread; a slow
//!   subscriber delays every later action and the dispatching caller itself.
//! - The dispatcher's internal lock is **not** held around the call, so
//!   implementations may re-enter the dispatcher freely (`dispatch`,
//!   `subscribe`, `unsubscribe`).
//! - Returning an error stops delivery of the current action at this
//!   subscriber and propagates to the caller driving the drain; it does not
//!   unregister the subscriber or discard queued actions.
//!
//! ## Example (skeleton)
//! ```rust
//! use dispatchq::{AnyAction, Dispatcher, Subscribe, SubscriberError};
//!
//! struct Audit;
//!
//! impl Subscribe for Audit {
//!     fn on_action(&self, _cx: &Dispatcher, _action: &AnyAction) -> Result<(), SubscriberError> {
//!         // write audit record...
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "audit"
//!     }
//! }
//! ```

use crate::actions::AnyAction;
use crate::dispatch::Dispatcher;
use crate::error::SubscriberError;

/// Contract for synchronous action subscribers.
///
/// Called inline from the drain loop, one action at a time, in registration
/// order. See the module docs for the reentrancy and failure rules.
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single delivered action.
    ///
    /// # Parameters
    /// - `dispatcher`: the delivering dispatcher handle; safe to re-enter
    /// - `action`: shared reference to the action (downcast to inspect)
    fn on_action(&self, dispatcher: &Dispatcher, action: &AnyAction) -> Result<(), SubscriberError>;

    /// Human-readable name (used in error values and logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
