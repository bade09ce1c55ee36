//! Error types for the event broadcaster.
//!
//! Publishing never fails, so the only runtime error is subscribing to a
//! broadcaster that has already been shut down. The other errors reject
//! configuration before a broadcaster is built.

use crate::config::MAX_QUEUE_CAPACITY;
use crate::topic::Topic;

/// Errors returned by [`Broadcaster`](crate::Broadcaster) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastError {
    /// The broadcaster has been shut down and accepts no new subscribers.
    #[error("broadcaster is shut down; cannot subscribe to topic '{topic}'")]
    ShutDown {
        /// The topic the caller tried to subscribe to.
        topic: Topic,
    },
}

/// An unrecognised [`OverflowPolicy`](crate::OverflowPolicy) name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overflow policy '{0}' (expected 'drop-newest' or 'disconnect')")]
pub struct ParseOverflowPolicyError(pub String);

/// A requested queue bound larger than [`MAX_QUEUE_CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue capacity {requested} exceeds the maximum of {MAX_QUEUE_CAPACITY}")]
pub struct QueueCapacityError {
    /// The rejected capacity.
    pub requested: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shut_down_display_names_topic() {
        let err = BroadcastError::ShutDown {
            topic: Topic::from("personAdded"),
        };
        assert_eq!(
            err.to_string(),
            "broadcaster is shut down; cannot subscribe to topic 'personAdded'"
        );
    }

    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<BroadcastError>();
        }
    };
}
