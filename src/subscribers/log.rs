//! # Simple logging subscriber for debugging and demos.
//!
//! [`ActionLogger`] prints a line per delivered action to stdout.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [delivered] n=1 pending=2
//! [delivered] n=2 pending=1
//! [delivered] n=3 pending=0
//! ```
//!
//! Actions are opaque (`dyn Any`), so the logger reports delivery sequence
//! and queue depth rather than action contents.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::actions::AnyAction;
use crate::dispatch::Dispatcher;
use crate::error::SubscriberError;
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints a delivery counter and the
/// remaining queue depth for each action it receives.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct ActionLogger {
    delivered: AtomicU64,
}

impl ActionLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Subscribe for ActionLogger {
    fn on_action(&self, dispatcher: &Dispatcher, _action: &AnyAction) -> Result<(), SubscriberError> {
        let n = self.delivered.fetch_add(1, AtomicOrdering::Relaxed) + 1;
        // The dispatcher lock is not held during delivery, so reading the
        // queue depth here cannot deadlock.
        println!("[delivered] n={n} pending={}", dispatcher.pending());
        Ok(())
    }

    fn name(&self) -> &str {
        "ActionLogger"
    }
}
