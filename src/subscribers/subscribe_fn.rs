//! # Function-backed subscriber (`SubscribeFn`)
//!
//! [`SubscribeFn`] wraps a closure `F: Fn(&Dispatcher, &AnyAction) -> Result<...>`
//! so ad-hoc subscribers don't need a named type. The closure is shared, not
//! recreated per delivery; keep captured state behind `Arc`/atomics if it is
//! mutated.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use dispatchq::{Dispatcher, DispatcherConfig, Subscribe, SubscribeFn};
//!
//! let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let sub = SubscribeFn::arc("counter", move |_cx, action| {
//!     if let Some(n) = action.downcast_ref::<u64>() {
//!         sink.lock().unwrap().push(*n);
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(sub.name(), "counter");
//!
//! let dispatcher = Dispatcher::new(DispatcherConfig::default());
//! dispatcher.subscribe(sub).unwrap();
//! dispatcher.dispatch(3u64).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![3]);
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::actions::AnyAction;
use crate::dispatch::Dispatcher;
use crate::error::SubscriberError;
use crate::subscribers::Subscribe;

/// Function-backed subscriber implementation.
///
/// Wraps a closure invoked once per delivered action.
#[derive(Debug)]
pub struct SubscribeFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> SubscribeFn<F>
where
    F: Fn(&Dispatcher, &AnyAction) -> Result<(), SubscriberError> + Send + Sync + 'static,
{
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscribeFn::arc`] when you immediately need an
    /// `Arc<dyn Subscribe>` for registration.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> Subscribe for SubscribeFn<F>
where
    F: Fn(&Dispatcher, &AnyAction) -> Result<(), SubscriberError> + Send + Sync + 'static,
{
    fn on_action(&self, dispatcher: &Dispatcher, action: &AnyAction) -> Result<(), SubscriberError> {
        (self.f)(dispatcher, action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
