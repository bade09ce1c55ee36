//! In-process publish/subscribe for the Switchboard service.
//!
//! A [`Broadcaster`] fans events out to every live [`Subscription`] on a
//! [`Topic`]. It is deliberately small:
//!
//! - **Fire-and-forget**: an event published while a topic has no
//!   subscribers is discarded. There is no replay and no buffering
//!   before subscription.
//! - **Per-subscriber queues**: each subscription owns its own FIFO
//!   queue, unbounded by default (see [`BroadcastConfig`]).
//! - **Implicit topics**: a topic exists while it has at least one
//!   subscriber and disappears with its last one.
//! - **Explicit lifecycle**: a subscription is removed by
//!   [`Subscription::unsubscribe`] or by dropping it; the broadcaster
//!   itself is terminated by [`Broadcaster::shutdown`].
//!
//! # Example
//!
//! ```
//! # async fn demo() -> Result<(), switchboard_broadcast::BroadcastError> {
//! use switchboard_broadcast::Broadcaster;
//!
//! let broadcaster = Broadcaster::new();
//! let mut sub = broadcaster.subscribe("greetings")?;
//!
//! assert_eq!(broadcaster.publish("greetings", "hello"), 1);
//! let event = sub.recv().await;
//! assert_eq!(event.map(|e| *e.payload()), Some("hello"));
//! # Ok(())
//! # }
//! ```

pub mod broadcaster;
pub mod config;
pub mod error;
pub mod event;
mod queue;
pub mod subscription;
pub mod topic;

pub use broadcaster::Broadcaster;
pub use config::{BroadcastConfig, MAX_QUEUE_CAPACITY, OverflowPolicy};
pub use error::{BroadcastError, ParseOverflowPolicyError, QueueCapacityError};
pub use event::Event;
pub use subscription::{SubscriberId, Subscription};
pub use topic::Topic;
