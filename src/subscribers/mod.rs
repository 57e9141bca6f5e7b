//! # Subscribers for dispatched actions.
//!
//! This module provides the two subscriber contracts of the dispatcher and
//! the built-in implementations.
//!
//! ## Architecture
//! ```text
//! Action flow (queued path):
//!   producer ── dispatch(action) ──► queue ──► drain loop (inline, one at a time)
//!                                                  │
//!                                                  ├──► Subscribe::on_action(&dispatcher, &action)
//!                                                  │         │
//!                                                  │    ┌────┴────┬──────────┐
//!                                                  │    ▼         ▼          ▼
//!                                                  │  stores   ActionLogger  ...
//!                                                  │
//! Async path (independent):                        │
//!   producer ── dispatch_async(action) ────────────┴──► SubscribeAsync::on_action(action)
//! ```
//!
//! ## Subscriber types
//! - **Synchronous subscribers** ([`Subscribe`]) - ordered fan-out, invoked
//!   inline by the drain loop
//! - **The async subscriber** ([`SubscribeAsync`]) - a single slot, awaited
//!   directly with no queueing
//!
//! ## Implementing custom subscribers
//! ```rust
//! use dispatchq::{AnyAction, Dispatcher, Subscribe, SubscriberError};
//!
//! struct Metrics;
//!
//! impl Subscribe for Metrics {
//!     fn on_action(&self, _cx: &Dispatcher, action: &AnyAction) -> Result<(), SubscriberError> {
//!         if action.downcast_ref::<String>().is_some() {
//!             // increment counter
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod subscribe;
mod subscribe_async;
mod subscribe_fn;

#[cfg(feature = "logging")]
mod log;

pub use subscribe::Subscribe;
pub use subscribe_async::SubscribeAsync;
pub use subscribe_fn::SubscribeFn;

#[cfg(feature = "logging")]
pub use log::ActionLogger;
