//! Published events.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::topic::Topic;

/// An immutable payload tagged with the topic it was published on.
///
/// Every subscriber receives a clone of the same event; the payload is
/// shared behind an [`Arc`] so cloning never copies it.
#[derive(Debug)]
pub struct Event<E> {
    topic: Topic,
    sequence: u64,
    published_at: DateTime<Utc>,
    payload: Arc<E>,
}

impl<E> Event<E> {
    pub(crate) fn new(topic: Topic, sequence: u64, payload: E) -> Self {
        Self {
            topic,
            sequence,
            published_at: Utc::now(),
            payload: Arc::new(payload),
        }
    }

    /// The topic this event was published on.
    pub const fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Broadcaster-wide publish counter at the time of publication.
    ///
    /// Strictly increasing in publish order, so subscribers can compare
    /// the order in which they observed events.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wall-clock time of publication.
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Borrow the payload.
    pub fn payload(&self) -> &E {
        &self.payload
    }

    /// Take the shared payload.
    pub fn into_payload(self) -> Arc<E> {
        self.payload
    }
}

impl<E> Clone for Event<E> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            sequence: self.sequence,
            published_at: self.published_at,
            payload: Arc::clone(&self.payload),
        }
    }
}
