//! Subscription handles.
//!
//! A [`Subscription`] is the consumer's end of one subscriber registration.
//! It is a lazy, potentially infinite, non-restartable [`Stream`] of
//! [`Event`]s: it suspends while the queue is empty and never ends on its
//! own. It ends when the consumer calls [`Subscription::unsubscribe`] or
//! drops it, or when the broadcaster is shut down or dropped.
//!
//! The handle only holds a [`Weak`] reference back to the broadcaster, so
//! an outstanding subscription never keeps a broadcaster alive.

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Weak;

use futures::Stream;
use tracing::debug;

use crate::broadcaster::Shared;
use crate::event::Event;
use crate::queue::QueueReceiver;
use crate::topic::Topic;

/// Identifier of a subscriber, unique within one broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A live listener on one topic.
pub struct Subscription<E> {
    topic: Topic,
    id: SubscriberId,
    receiver: QueueReceiver<E>,
    broadcaster: Weak<Shared<E>>,
    active: bool,
}

impl<E> Subscription<E> {
    pub(crate) const fn new(
        topic: Topic,
        id: SubscriberId,
        receiver: QueueReceiver<E>,
        broadcaster: Weak<Shared<E>>,
    ) -> Self {
        Self {
            topic,
            id,
            receiver,
            broadcaster,
            active: true,
        }
    }

    /// The topic this subscription listens on.
    pub const fn topic(&self) -> &Topic {
        &self.topic
    }

    /// The subscriber id assigned by the broadcaster.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Whether [`unsubscribe`](Self::unsubscribe) has not been called yet.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Wait for the next event.
    ///
    /// Returns `None` after [`unsubscribe`](Self::unsubscribe), or once the
    /// broadcaster has shut down and every queued event has been read.
    pub async fn recv(&mut self) -> Option<Event<E>> {
        std::future::poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Remove this subscriber from its topic.
    ///
    /// Events still queued are discarded and nothing published afterwards
    /// is delivered. Calling this more than once is a no-op.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.receiver.close();

        let removed = self
            .broadcaster
            .upgrade()
            .is_some_and(|shared| shared.deregister(&self.topic, self.id));
        debug!(topic = %self.topic, subscriber = %self.id, removed, "unsubscribed");
    }

    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<Event<E>>> {
        if !self.active {
            return Poll::Ready(None);
        }
        self.receiver.poll_recv(cx)
    }
}

impl<E> Stream for Subscription<E> {
    type Item = Event<E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_recv(cx)
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
