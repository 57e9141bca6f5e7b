//! # The dispatcher core: FIFO queue, subscriber set, drain loop.
//!
//! One mutex guards all mutable state (queue, sync subscriber set, async
//! subscriber slot, drain flag). Every control decision is made while holding
//! it; subscriber invocation happens strictly outside it.
//!
//! ## Drain algorithm
//! ```text
//! dispatch(action) / subscribe(sub)
//!     │ lock: push / register
//!     ▼
//! drain():
//!   lock:
//!     draining || subscribers.is_empty() ──► return   (someone else owns it,
//!     draining = true                                   or nothing to deliver)
//!   loop:
//!     lock:
//!       subscribers empty? ──► draining = false, exit
//!       pop head            ──► none? draining = false, exit
//!       snapshot subscribers (Arc clones, registration order)
//!     unlock
//!     for sub in snapshot:            ◄─ callbacks run without the lock;
//!         sub.on_action(self, &action)   reentrant dispatch/subscribe/
//!                                        unsubscribe cannot deadlock
//! ```
//!
//! The flag check and the pop happen in the same critical section, and the
//! flag is released in that same section when the queue or subscriber set is
//! observed empty. Every enqueue and every subscription re-attempts the
//! claim, so an action enqueued between "check" and "release" is never lost:
//! either the active drain still observes it, or the enqueuing caller claims
//! the flag itself.
//!
//! An RAII guard releases the flag if delivery exits early (subscriber error
//! or panic), so a later trigger can always re-claim.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::actions::{erase, AnyAction};
use crate::dispatch::{DispatcherBuilder, DispatcherConfig};
use crate::error::DispatchError;
use crate::subscribers::{Subscribe, SubscribeAsync};

/// Global sequence counter for subscription ids.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque handle identifying one synchronous subscription.
///
/// Returned by [`Dispatcher::subscribe`]; pass it to
/// [`Dispatcher::unsubscribe`] to remove the registration. Ids are
/// process-unique and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(SUBSCRIPTION_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// One registered synchronous subscriber.
struct Registration {
    id: SubscriptionId,
    subscriber: Arc<dyn Subscribe>,
}

/// Mutable dispatcher state; guarded by the single mutex in [`Dispatcher`].
struct State {
    /// Pending actions, strict arrival order across all producers.
    queue: VecDeque<AnyAction>,
    /// Synchronous subscribers in registration order.
    subscribers: Vec<Registration>,
    /// The single asynchronous subscriber slot.
    async_subscriber: Option<Arc<dyn SubscribeAsync>>,
    /// Whether a drain loop currently owns the queue.
    draining: bool,
}

/// Multi-producer action dispatcher with strict FIFO inline delivery.
///
/// Cloning is cheap and shares all state: every clone dispatches into the
/// same queue and subscriber set. There is no background thread; whichever
/// caller wins the drain claim delivers queued actions on its own thread,
/// one action fully processed (all subscribers, registration order) before
/// the next is popped.
///
/// ## Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use dispatchq::{Dispatcher, DispatcherConfig, SubscribeFn};
///
/// let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let dispatcher = Dispatcher::new(DispatcherConfig::default());
///
/// // Actions buffer while nobody is subscribed...
/// dispatcher.dispatch(1u64)?;
/// dispatcher.dispatch(2u64)?;
/// assert_eq!(dispatcher.pending(), 2);
///
/// // ...and flush, in order, as soon as the first subscriber appears.
/// dispatcher.subscribe(SubscribeFn::arc("sink", move |_cx, action| {
///     if let Some(n) = action.downcast_ref::<u64>() {
///         sink.lock().unwrap().push(*n);
///     }
///     Ok(())
/// }))?;
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// assert_eq!(dispatcher.pending(), 0);
/// # Ok::<(), dispatchq::DispatchError>(())
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    state: Arc<Mutex<State>>,
}

impl Dispatcher {
    /// Creates a dispatcher with no subscribers.
    pub fn new(cfg: DispatcherConfig) -> Self {
        Self::with_parts(cfg, Vec::new(), None)
    }

    /// Returns a builder for pre-registering subscribers at construction.
    pub fn builder(cfg: DispatcherConfig) -> DispatcherBuilder {
        DispatcherBuilder::new(cfg)
    }

    pub(crate) fn with_parts(
        cfg: DispatcherConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
        async_subscriber: Option<Arc<dyn SubscribeAsync>>,
    ) -> Self {
        let queue = match cfg.initial_capacity() {
            Some(n) => VecDeque::with_capacity(n),
            None => VecDeque::new(),
        };
        let subscribers = subscribers
            .into_iter()
            .map(|subscriber| Registration {
                id: SubscriptionId::next(),
                subscriber,
            })
            .collect();

        Self {
            state: Arc::new(Mutex::new(State {
                queue,
                subscribers,
                async_subscriber,
                draining: false,
            })),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        // The lock is only ever held for state manipulation, never across
        // subscriber callbacks, so it cannot be poisoned by user code.
        self.state.lock().unwrap()
    }

    /// Queues an action and attempts to drain.
    ///
    /// The action is appended to the queue tail atomically with respect to
    /// all other producers; delivery reaches every subscriber registered at
    /// the moment the action is *popped*, not the set at enqueue time.
    ///
    /// If this caller wins the drain claim, delivery of the whole backlog
    /// happens inline on its thread before the call returns, and a failing
    /// subscriber surfaces here as [`DispatchError::Subscriber`].
    pub fn dispatch<A>(&self, action: A) -> Result<(), DispatchError>
    where
        A: Send + Sync + 'static,
    {
        self.dispatch_arc(erase(action))
    }

    /// Queues a pre-erased action (see [`erase`](crate::erase)).
    ///
    /// This is the boundary where an absent action is representable:
    /// passing `None` fails with [`DispatchError::NullAction`] before any
    /// queue mutation. Prefer this method over [`dispatch`](Self::dispatch)
    /// when the action is already an [`AnyAction`]: the generic method
    /// would wrap it a second time and break subscriber downcasts.
    pub fn dispatch_arc(&self, action: impl Into<Option<AnyAction>>) -> Result<(), DispatchError> {
        let Some(action) = action.into() else {
            return Err(DispatchError::NullAction);
        };
        self.lock_state().queue.push_back(action);
        self.drain()
    }

    /// Delivers an action directly to the single async subscriber.
    ///
    /// Bypasses the queue entirely: no ordering relationship to
    /// [`dispatch`](Self::dispatch), no buffering. Fails with
    /// [`DispatchError::NoAsyncSubscriber`] when no async subscriber is
    /// registered. Awaiting the returned future is the completion signal.
    pub async fn dispatch_async<A>(&self, action: A) -> Result<(), DispatchError>
    where
        A: Send + Sync + 'static,
    {
        self.dispatch_async_arc(erase(action)).await
    }

    /// Pre-erased variant of [`dispatch_async`](Self::dispatch_async).
    pub async fn dispatch_async_arc(&self, action: AnyAction) -> Result<(), DispatchError> {
        let subscriber = self
            .lock_state()
            .async_subscriber
            .clone()
            .ok_or(DispatchError::NoAsyncSubscriber)?;

        // The lock is released before awaiting; the handler may dispatch
        // queued actions itself.
        subscriber
            .on_action(action)
            .await
            .map_err(|source| DispatchError::Subscriber {
                name: subscriber.name().to_string(),
                source,
            })
    }

    /// Registers a synchronous subscriber at the end of the delivery order.
    ///
    /// Registration triggers a drain, so actions buffered while no
    /// subscriber existed are flushed before this returns. A backlog
    /// delivery failure during that flush propagates (the registration
    /// itself has already taken effect).
    pub fn subscribe(&self, subscriber: Arc<dyn Subscribe>) -> Result<SubscriptionId, DispatchError> {
        let id = SubscriptionId::next();
        self.lock_state().subscribers.push(Registration { id, subscriber });
        self.drain()?;
        Ok(id)
    }

    /// Removes a synchronous subscriber.
    ///
    /// Takes effect from the next popped action: an active drain re-reads
    /// the set before every delivery, but the snapshot for the action
    /// currently being delivered is already fixed. Returns whether the id
    /// was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock_state();
        let before = state.subscribers.len();
        state.subscribers.retain(|r| r.id != id);
        state.subscribers.len() != before
    }

    /// Sets (or replaces) the single asynchronous subscriber.
    pub fn set_async_subscriber(&self, subscriber: Arc<dyn SubscribeAsync>) {
        self.lock_state().async_subscriber = Some(subscriber);
    }

    /// Clears the asynchronous subscriber slot.
    pub fn clear_async_subscriber(&self) {
        self.lock_state().async_subscriber = None;
    }

    /// Number of actions currently waiting in the queue.
    pub fn pending(&self) -> usize {
        self.lock_state().queue.len()
    }

    /// Number of registered synchronous subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock_state().subscribers.len()
    }

    /// Whether a drain loop currently owns the queue.
    pub fn is_draining(&self) -> bool {
        self.lock_state().draining
    }

    /// Attempts to claim the drain flag and, on success, delivers queued
    /// actions until the queue or the subscriber set is observed empty.
    fn drain(&self) -> Result<(), DispatchError> {
        {
            let mut state = self.lock_state();
            if state.draining || state.subscribers.is_empty() {
                // An active drain will still observe whatever this caller
                // changed: the flag check and the pop share a critical
                // section, so the claim holder cannot exit without seeing it.
                return Ok(());
            }
            state.draining = true;
        }

        let mut guard = DrainGuard::new(self);
        loop {
            let (action, snapshot) = {
                let mut state = self.lock_state();
                if state.subscribers.is_empty() {
                    state.draining = false;
                    break;
                }
                match state.queue.pop_front() {
                    Some(action) => {
                        let snapshot: Vec<Arc<dyn Subscribe>> = state
                            .subscribers
                            .iter()
                            .map(|r| Arc::clone(&r.subscriber))
                            .collect();
                        (action, snapshot)
                    }
                    None => {
                        state.draining = false;
                        break;
                    }
                }
            };

            // Lock released: subscribers may re-enter the dispatcher.
            for subscriber in &snapshot {
                subscriber
                    .on_action(self, &action)
                    .map_err(|source| DispatchError::Subscriber {
                        name: subscriber.name().to_string(),
                        source,
                    })?;
            }
        }
        guard.disarm();
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

/// Releases the drain flag when delivery exits early.
///
/// Structural exits (empty queue / empty subscriber set) clear the flag
/// inside the critical section that observed the emptiness, then disarm the
/// guard. Any other exit (a subscriber error or panic) must not leave the
/// flag set, or no future trigger could ever claim the queue again.
struct DrainGuard<'a> {
    dispatcher: &'a Dispatcher,
    armed: bool,
}

impl<'a> DrainGuard<'a> {
    fn new(dispatcher: &'a Dispatcher) -> Self {
        Self {
            dispatcher,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.dispatcher.lock_state().draining = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use crate::subscribers::SubscribeFn;

    fn recorder(seen: &Arc<Mutex<Vec<u64>>>) -> Arc<dyn Subscribe> {
        let sink = Arc::clone(seen);
        SubscribeFn::arc("recorder", move |_cx, action| {
            if let Some(n) = action.downcast_ref::<u64>() {
                sink.lock().unwrap().push(*n);
            }
            Ok(())
        })
    }

    #[test]
    fn test_null_action_rejected_queue_unchanged() {
        let dispatcher = Dispatcher::default();

        let err = dispatcher.dispatch_arc(None).unwrap_err();
        assert!(matches!(err, DispatchError::NullAction));
        assert_eq!(dispatcher.pending(), 0);

        // A subsequent legitimate dispatch still drains correctly.
        let seen = Arc::new(Mutex::new(Vec::new()));
        dispatcher.subscribe(recorder(&seen)).unwrap();
        dispatcher.dispatch(7u64).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_actions_buffer_until_first_subscriber() {
        let dispatcher = Dispatcher::default();

        dispatcher.dispatch(1u64).unwrap();
        dispatcher.dispatch(2u64).unwrap();
        dispatcher.dispatch(3u64).unwrap();
        assert_eq!(dispatcher.pending(), 3);

        let seen = Arc::new(Mutex::new(Vec::new()));
        dispatcher.subscribe(recorder(&seen)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let dispatcher = Dispatcher::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let id = dispatcher.subscribe(recorder(&seen)).unwrap();
        dispatcher.dispatch(1u64).unwrap();

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert_eq!(dispatcher.subscriber_count(), 0);

        // With no subscribers left the action buffers instead of vanishing.
        dispatcher.dispatch(2u64).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(dispatcher.pending(), 1);
    }

    #[test]
    fn test_unsubscribe_during_delivery_spares_current_action() {
        let dispatcher = Dispatcher::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        // "remover" drops the recorder while action 1 is being delivered.
        let victim: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&victim);
        let remover = SubscribeFn::arc("remover", move |cx, action| {
            if *action.downcast_ref::<u64>().unwrap() == 1 {
                if let Some(id) = *slot.lock().unwrap() {
                    cx.unsubscribe(id);
                }
            }
            Ok(())
        });

        dispatcher.subscribe(remover).unwrap();
        let id = dispatcher.subscribe(recorder(&seen)).unwrap();
        *victim.lock().unwrap() = Some(id);

        dispatcher.dispatch(1u64).unwrap();
        dispatcher.dispatch(2u64).unwrap();

        // The snapshot for action 1 was fixed before the removal, action 2
        // re-read the set.
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_reentrant_dispatch_delivered_after_current_action() {
        let dispatcher = Dispatcher::default();
        let log: Arc<Mutex<Vec<(char, u64)>>> = Arc::new(Mutex::new(Vec::new()));

        let a_log = Arc::clone(&log);
        let a = SubscribeFn::arc("a", move |cx, action| {
            let n = *action.downcast_ref::<u64>().unwrap();
            a_log.lock().unwrap().push(('a', n));
            if n == 1 {
                cx.dispatch(2u64)?;
            }
            Ok(())
        });

        let b_log = Arc::clone(&log);
        let b = SubscribeFn::arc("b", move |_cx, action| {
            let n = *action.downcast_ref::<u64>().unwrap();
            b_log.lock().unwrap().push(('b', n));
            Ok(())
        });

        dispatcher.subscribe(a).unwrap();
        dispatcher.subscribe(b).unwrap();
        dispatcher.dispatch(1u64).unwrap();

        // Action 2 goes to the queue tail and is delivered only after
        // action 1 reached both subscribers.
        assert_eq!(
            *log.lock().unwrap(),
            vec![('a', 1), ('b', 1), ('a', 2), ('b', 2)]
        );
    }

    #[test]
    fn test_subscriber_error_propagates_and_queue_recovers() {
        let dispatcher = Dispatcher::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let flaky = SubscribeFn::arc("flaky", |_cx, action| {
            if *action.downcast_ref::<u64>().unwrap() == 13 {
                return Err("unlucky".into());
            }
            Ok(())
        });

        dispatcher.subscribe(flaky).unwrap();
        dispatcher.subscribe(recorder(&seen)).unwrap();

        dispatcher.dispatch(1u64).unwrap();

        let err = dispatcher.dispatch(13u64).unwrap_err();
        assert!(matches!(&err, DispatchError::Subscriber { name, .. } if name == "flaky"));
        assert_eq!(err.as_label(), "subscriber_failed");

        // Delivery of 13 stopped at the failing subscriber; the flag was
        // released, so unrelated actions still drain.
        assert!(!dispatcher.is_draining());
        dispatcher.dispatch(2u64).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_subscriber_panic_releases_drain_flag() {
        let dispatcher = Dispatcher::default();

        let panicker = SubscribeFn::arc("panicker", |_cx, action| {
            if action.downcast_ref::<&str>().is_some() {
                panic!("boom");
            }
            Ok(())
        });
        let id = dispatcher.subscribe(panicker).unwrap();

        let result = catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch("kaboom")));
        assert!(result.is_err());
        assert!(!dispatcher.is_draining());

        // The dispatcher stays usable after the unwind.
        assert!(dispatcher.unsubscribe(id));
        let seen = Arc::new(Mutex::new(Vec::new()));
        dispatcher.subscribe(recorder(&seen)).unwrap();
        dispatcher.dispatch(5u64).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }

    #[test]
    fn test_dispatch_arc_preserves_downcast() {
        let dispatcher = Dispatcher::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        dispatcher.subscribe(recorder(&seen)).unwrap();

        dispatcher.dispatch_arc(erase(9u64)).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![9]);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let dispatcher = Dispatcher::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = dispatcher.subscribe(recorder(&seen)).unwrap();
        let second = dispatcher.subscribe(recorder(&seen)).unwrap();
        assert_ne!(first, second);

        assert!(dispatcher.unsubscribe(first));
        assert_eq!(dispatcher.subscriber_count(), 1);
    }
}
