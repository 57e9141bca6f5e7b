//! # dispatchq
//!
//! **dispatchq** is a small multi-producer action dispatcher for Rust.
//!
//! Producers hand opaque action values to a [`Dispatcher`] from any number
//! of threads; the dispatcher serializes them into strict arrival order and
//! delivers each one, one at a time, to an ordered, mutable set of
//! synchronous subscribers. A separate, deliberately narrow async path
//! awaits a single asynchronous subscriber directly. The crate is designed
//! as a building block for unidirectional-data-flow architectures (stores
//! reducing actions into state) and similar fan-out cores.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌────────────┐   ┌────────────┐   ┌────────────┐
//!  │ producer 1 │   │ producer 2 │   │ producer N │     (any threads)
//!  └─────┬──────┘   └─────┬──────┘   └─────┬──────┘
//!        │ dispatch()     │                │
//!        ▼                ▼                ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Dispatcher (one mutex guards everything below)           │
//! │  - FIFO queue of pending actions                          │
//! │  - ordered set of sync subscribers                        │
//! │  - single async subscriber slot                           │
//! │  - drain-in-progress flag (at most one drain loop)        │
//! └───────────────────────────┬───────────────────────────────┘
//!                             │ drain loop, inline on the
//!                             │ claiming caller's thread
//!              ┌──────────────┼──────────────┐
//!              ▼              ▼              ▼
//!          sub1.on_action  sub2.on_action  subN.on_action
//!          (registration order, lock released, one action
//!           fully processed before the next is popped)
//!
//!  dispatch_async() ──────────────────────► async subscriber
//!  (bypasses the queue entirely; no ordering vs dispatch())
//! ```
//!
//! ### Delivery lifecycle
//! ```text
//! dispatch(action)
//!   ├─► reject absent action (NullAction, queue untouched)
//!   ├─► lock: queue.push_back(action)
//!   └─► drain trigger (idempotent):
//!         ├─ drain already owned, or no subscribers ─► return
//!         └─ claim won ─► loop:
//!              ├─ lock: pop head + snapshot subscribers
//!              │        (queue or set empty ─► release flag, exit)
//!              ├─ unlock
//!              └─ invoke snapshot in order
//!                   ├─ reentrant dispatch/subscribe/unsubscribe: fine
//!                   └─ error ─► propagate to this caller,
//!                               flag released, queue kept
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------------|
//! | **Dispatch**      | Queue actions with strict FIFO inline delivery.                   | [`Dispatcher`]                            |
//! | **Subscribers**   | Ordered sync fan-out; removable registrations.                    | [`Subscribe`], [`SubscribeFn`], [`SubscriptionId`] |
//! | **Async path**    | Single async subscriber, awaited directly, no queueing.           | [`SubscribeAsync`]                        |
//! | **Actions**       | Type-erased, shared payloads; subscribers downcast.               | [`AnyAction`], [`erase`]                  |
//! | **Errors**        | Typed errors; nothing swallowed or retried.                       | [`DispatchError`], [`SubscriberError`]    |
//! | **Configuration** | Construction-time settings and pre-registration.                  | [`DispatcherConfig`], [`DispatcherBuilder`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`ActionLogger`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use dispatchq::{Dispatcher, DispatcherConfig, SubscribeFn};
//!
//! #[derive(Debug, PartialEq)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! fn main() -> Result<(), dispatchq::DispatchError> {
//!     let dispatcher = Dispatcher::new(DispatcherConfig::default());
//!
//!     // A minimal "store": reduces actions into state.
//!     let value = Arc::new(Mutex::new(0i64));
//!     let state = Arc::clone(&value);
//!     dispatcher.subscribe(SubscribeFn::arc("counter-store", move |_cx, action| {
//!         if let Some(action) = action.downcast_ref::<CounterAction>() {
//!             let mut v = state.lock().unwrap();
//!             match action {
//!                 CounterAction::Increment => *v += 1,
//!                 CounterAction::Decrement => *v -= 1,
//!             }
//!         }
//!         Ok(())
//!     }))?;
//!
//!     dispatcher.dispatch(CounterAction::Increment)?;
//!     dispatcher.dispatch(CounterAction::Increment)?;
//!     dispatcher.dispatch(CounterAction::Decrement)?;
//!
//!     assert_eq!(*value.lock().unwrap(), 1);
//!     Ok(())
//! }
//! ```

mod actions;
mod dispatch;
mod error;
mod subscribers;

// ---- Public re-exports ----

pub use actions::{erase, AnyAction};
pub use dispatch::{Dispatcher, DispatcherBuilder, DispatcherConfig, SubscriptionId};
pub use error::{DispatchError, SubscriberError};
pub use subscribers::{Subscribe, SubscribeAsync, SubscribeFn};

// Optional: expose a simple built-in logging subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::ActionLogger;
