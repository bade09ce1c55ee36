//! Per-subscriber delivery queues.
//!
//! Thin enum dispatch over Tokio's bounded and unbounded MPSC channels so
//! the broadcaster can pick the flavour at subscribe time from its
//! [`BroadcastConfig`](crate::BroadcastConfig) without boxing.

use core::num::NonZeroUsize;
use core::task::{Context, Poll};

use tokio::sync::mpsc;

use crate::config::MAX_QUEUE_CAPACITY;
use crate::event::Event;

/// Why an event could not be enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnqueueError {
    /// Bounded queue at capacity.
    Full,
    /// Receiving side is gone.
    Closed,
}

/// Sending half, owned by the broadcaster's registry.
#[derive(Debug)]
pub(crate) enum QueueSender<E> {
    Unbounded(mpsc::UnboundedSender<Event<E>>),
    Bounded(mpsc::Sender<Event<E>>),
}

impl<E> QueueSender<E> {
    /// Enqueue without waiting.
    pub(crate) fn try_send(&self, event: Event<E>) -> Result<(), EnqueueError> {
        match self {
            Self::Unbounded(tx) => tx
                .send(event)
                .map_err(|mpsc::error::SendError(_rejected)| EnqueueError::Closed),
            Self::Bounded(tx) => tx.try_send(event).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
                mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
            }),
        }
    }
}

/// Receiving half, owned by a [`Subscription`](crate::Subscription).
#[derive(Debug)]
pub(crate) enum QueueReceiver<E> {
    Unbounded(mpsc::UnboundedReceiver<Event<E>>),
    Bounded(mpsc::Receiver<Event<E>>),
}

impl<E> QueueReceiver<E> {
    /// Poll for the next queued event. `Ready(None)` once every sender is
    /// dropped and the queue is drained.
    pub(crate) fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<Event<E>>> {
        match self {
            Self::Unbounded(rx) => rx.poll_recv(cx),
            Self::Bounded(rx) => rx.poll_recv(cx),
        }
    }

    /// Refuse further sends; already queued events stay readable.
    pub(crate) fn close(&mut self) {
        match self {
            Self::Unbounded(rx) => rx.close(),
            Self::Bounded(rx) => rx.close(),
        }
    }
}

/// Create a queue, bounded when `capacity` is set.
///
/// Bounds above [`MAX_QUEUE_CAPACITY`] are clamped, since Tokio panics on
/// them.
pub(crate) fn channel<E>(capacity: Option<NonZeroUsize>) -> (QueueSender<E>, QueueReceiver<E>) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.get().min(MAX_QUEUE_CAPACITY));
            (QueueSender::Bounded(tx), QueueReceiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (QueueSender::Unbounded(tx), QueueReceiver::Unbounded(rx))
        }
    }
}
