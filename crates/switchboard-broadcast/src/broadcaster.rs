//! The topic-keyed fan-out primitive.
//!
//! # Design
//!
//! All registry state (topic → subscriber set, id and sequence counters,
//! shutdown flag) lives behind one [`std::sync::Mutex`]. `publish`,
//! `subscribe`, `unsubscribe` and `shutdown` each take that lock exactly
//! once and never hold it across an `.await`, which gives:
//!
//! - **Single-writer ordering**: a publish fans out to the whole topic
//!   under the lock, so every subscriber of a topic sees publishes in the
//!   same relative order.
//! - **Race-free cancellation**: once `unsubscribe` has removed a
//!   subscriber, no concurrent publish can still reach it.
//! - **Synchronous drop**: a dropped [`Subscription`] deregisters itself
//!   without needing a runtime.
//!
//! Lock poisoning is recovered rather than propagated: every critical
//! section leaves the registry consistent before it can panic.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::config::{BroadcastConfig, OverflowPolicy};
use crate::error::BroadcastError;
use crate::event::Event;
use crate::queue::{self, EnqueueError, QueueSender};
use crate::subscription::{SubscriberId, Subscription};
use crate::topic::Topic;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Mutable broadcaster state guarded by [`Shared::registry`].
#[derive(Debug)]
struct Registry<E> {
    /// Live subscribers per topic, in subscription order. A topic is
    /// present only while its set is non-empty.
    topics: HashMap<Topic, BTreeMap<SubscriberId, QueueSender<E>>>,
    next_subscriber: u64,
    next_sequence: u64,
    shut_down: bool,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_subscriber: 0,
            next_sequence: 0,
            shut_down: false,
        }
    }

    fn allocate_subscriber(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber = self.next_subscriber.wrapping_add(1);
        id
    }

    fn allocate_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        sequence
    }

    /// Remove one subscriber, dropping the topic if it was the last.
    fn remove(&mut self, topic: &Topic, id: SubscriberId) -> bool {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return false;
        };
        let removed = subscribers.remove(&id).is_some();
        if subscribers.is_empty() {
            self.topics.remove(topic);
            trace!(topic = %topic, "topic has no subscribers left, removed");
        }
        removed
    }
}

/// State shared between a [`Broadcaster`] and (weakly) its subscriptions.
#[derive(Debug)]
pub(crate) struct Shared<E> {
    config: BroadcastConfig,
    registry: Mutex<Registry<E>>,
}

impl<E> Shared<E> {
    fn lock(&self) -> MutexGuard<'_, Registry<E>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove a subscriber. Returns whether it was still registered.
    pub(crate) fn deregister(&self, topic: &Topic, id: SubscriberId) -> bool {
        self.lock().remove(topic, id)
    }
}

// ---------------------------------------------------------------------------
// Broadcaster
// ---------------------------------------------------------------------------

/// In-process publish/subscribe hub for payloads of type `E`.
///
/// Cloning a `Broadcaster` is cheap and yields another handle to the same
/// hub.
#[derive(Debug)]
pub struct Broadcaster<E> {
    shared: Arc<Shared<E>>,
}

impl<E> Clone for Broadcaster<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> Default for Broadcaster<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Broadcaster<E> {
    /// A broadcaster with unbounded subscriber queues.
    pub fn new() -> Self {
        Self::with_config(BroadcastConfig::default())
    }

    /// A broadcaster whose subscriber queues follow `config`.
    pub fn with_config(config: BroadcastConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    /// The queue configuration applied to new subscriptions.
    pub fn config(&self) -> BroadcastConfig {
        self.shared.config
    }

    /// Register a new subscriber on `topic`.
    ///
    /// The subscriber only receives events published after this call
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError::ShutDown`] once [`shutdown`](Self::shutdown)
    /// has been called.
    pub fn subscribe(&self, topic: impl Into<Topic>) -> Result<Subscription<E>, BroadcastError> {
        let topic = topic.into();
        let mut registry = self.shared.lock();
        if registry.shut_down {
            return Err(BroadcastError::ShutDown { topic });
        }

        let (tx, rx) = queue::channel(self.shared.config.queue_capacity);
        let id = registry.allocate_subscriber();
        let subscribers = registry.topics.entry(topic.clone()).or_default();
        subscribers.insert(id, tx);
        let count = subscribers.len();
        drop(registry);

        debug!(topic = %topic, subscriber = %id, subscribers = count, "subscribed");
        Ok(Subscription::new(topic, id, rx, Arc::downgrade(&self.shared)))
    }

    /// Publish `payload` to every current subscriber of `topic`.
    ///
    /// Returns how many subscribers the event was enqueued for. With no
    /// subscribers the event is discarded and `0` is returned; after
    /// shutdown publishing is a no-op. Never blocks on slow subscribers.
    pub fn publish(&self, topic: impl Into<Topic>, payload: E) -> usize {
        let topic = topic.into();
        let mut guard = self.shared.lock();
        let registry = &mut *guard;
        if registry.shut_down {
            trace!(topic = %topic, "publish after shutdown ignored");
            return 0;
        }

        let sequence = registry.allocate_sequence();
        let Some(subscribers) = registry.topics.get_mut(&topic) else {
            trace!(topic = %topic, sequence, "no subscribers, event discarded");
            return 0;
        };

        let event = Event::new(topic.clone(), sequence, payload);
        let overflow = self.shared.config.overflow;
        let mut delivered: usize = 0;

        subscribers.retain(|id, sender| match sender.try_send(event.clone()) {
            Ok(()) => {
                delivered = delivered.saturating_add(1);
                true
            }
            Err(EnqueueError::Full) => match overflow {
                OverflowPolicy::DropNewest => {
                    warn!(topic = %topic, subscriber = %id, sequence, "subscriber queue full, event dropped");
                    true
                }
                OverflowPolicy::Disconnect => {
                    warn!(topic = %topic, subscriber = %id, sequence, "subscriber queue full, disconnecting");
                    false
                }
            },
            Err(EnqueueError::Closed) => {
                debug!(topic = %topic, subscriber = %id, "subscriber queue closed, removing");
                false
            }
        });

        if subscribers.is_empty() {
            registry.topics.remove(&topic);
        }

        trace!(topic = %topic, sequence, delivered, "event published");
        delivered
    }

    /// Terminate the broadcaster.
    ///
    /// Every subscriber is deregistered; their streams yield any events
    /// already queued and then end. Later `subscribe` calls fail and later
    /// `publish` calls are ignored. Returns the number of subscribers that
    /// were closed; calling it again returns `0`.
    pub fn shutdown(&self) -> usize {
        let mut registry = self.shared.lock();
        if registry.shut_down {
            return 0;
        }
        registry.shut_down = true;
        let closed: usize = registry.topics.values().map(BTreeMap::len).sum();
        registry.topics.clear();
        drop(registry);

        debug!(closed, "broadcaster shut down");
        closed
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shared.lock().shut_down
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.shared.lock().topics.get(topic).map_or(0, BTreeMap::len)
    }

    /// Topics that currently have at least one subscriber.
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.shared.lock().topics.keys().cloned().collect();
        topics.sort();
        topics
    }
}
