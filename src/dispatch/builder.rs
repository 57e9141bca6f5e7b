use std::sync::Arc;

use crate::dispatch::{Dispatcher, DispatcherConfig};
use crate::subscribers::{Subscribe, SubscribeAsync};

/// Builder for constructing a [`Dispatcher`] with pre-registered subscribers.
///
/// Subscribers installed through the builder are part of the dispatcher for
/// its whole lifetime (no [`SubscriptionId`](crate::SubscriptionId) is
/// handed out); use [`Dispatcher::subscribe`] for removable registrations.
pub struct DispatcherBuilder {
    cfg: DispatcherConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    async_subscriber: Option<Arc<dyn SubscribeAsync>>,
}

impl DispatcherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: DispatcherConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            async_subscriber: None,
        }
    }

    /// Sets the initial ordered set of synchronous subscribers.
    ///
    /// Registration order is delivery order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the single asynchronous subscriber.
    pub fn with_async_subscriber(mut self, subscriber: Arc<dyn SubscribeAsync>) -> Self {
        self.async_subscriber = Some(subscriber);
        self
    }

    /// Builds and returns the dispatcher.
    ///
    /// No drain is triggered here: the queue of a freshly built dispatcher
    /// is necessarily empty.
    pub fn build(self) -> Dispatcher {
        Dispatcher::with_parts(self.cfg, self.subscribers, self.async_subscriber)
    }
}
