//! Error types used by the dispatcher.
//!
//! This module defines:
//!
//! - [`DispatchError`] — errors surfaced by dispatch and subscription operations.
//! - [`SubscriberError`] — the boxed error type subscriber callbacks may return.
//!
//! [`DispatchError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics, following a stable snake_case labelling scheme.

use thiserror::Error;

/// Boxed error returned by subscriber callbacks.
///
/// Subscribers choose their own failure type; the dispatcher carries it
/// upward unchanged inside [`DispatchError::Subscriber`] without inspecting
/// or logging it.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

/// # Errors produced by dispatch and subscription operations.
///
/// All errors surface to the immediate caller: `NullAction` to the producer
/// that submitted it, `Subscriber` to whichever thread happened to drive the
/// delivery loop. Nothing is retried or swallowed internally.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The queued dispatch path was handed an absent action.
    ///
    /// Raised before any queue mutation; a subsequent legitimate dispatch
    /// is unaffected.
    #[error("cannot dispatch an absent action")]
    NullAction,

    /// The async dispatch path was invoked with no async subscriber registered.
    #[error("no async subscriber is registered")]
    NoAsyncSubscriber,

    /// A subscriber returned an error while handling a delivered action.
    ///
    /// Delivery of the current action stops at the failing subscriber; queued
    /// actions are kept and drain on the next trigger.
    #[error("subscriber '{name}' failed: {source}")]
    Subscriber {
        /// Name of the failing subscriber (see `Subscribe::name`).
        name: String,
        /// The subscriber's own error, unchanged.
        #[source]
        source: SubscriberError,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use dispatchq::DispatchError;
    ///
    /// assert_eq!(DispatchError::NullAction.as_label(), "null_action");
    /// assert_eq!(DispatchError::NoAsyncSubscriber.as_label(), "no_async_subscriber");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::NullAction => "null_action",
            DispatchError::NoAsyncSubscriber => "no_async_subscriber",
            DispatchError::Subscriber { .. } => "subscriber_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::NullAction => "absent action rejected".to_string(),
            DispatchError::NoAsyncSubscriber => "async dispatch without a subscriber".to_string(),
            DispatchError::Subscriber { name, source } => {
                format!("subscriber={name} error={source}")
            }
        }
    }
}
