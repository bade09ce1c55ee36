//! Subscriber queue configuration.
//!
//! By default every subscription gets an unbounded queue, so a slow
//! consumer can grow memory without limit. Setting
//! [`BroadcastConfig::queue_capacity`] bounds each queue; what happens
//! when a bounded queue is full is decided by [`OverflowPolicy`]. In
//! neither case is the publisher blocked.

use core::fmt;
use core::num::NonZeroUsize;
use core::str::FromStr;

use crate::error::{ParseOverflowPolicyError, QueueCapacityError};

/// Largest per-subscriber queue bound. Matches the permit limit of Tokio's
/// bounded channels, which refuse anything larger.
pub const MAX_QUEUE_CAPACITY: usize = usize::MAX >> 3;

/// What to do when a bounded subscriber queue is full at publish time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Skip the new event for that subscriber and keep it registered.
    #[default]
    DropNewest,
    /// Deregister the subscriber. Its stream ends once the events
    /// already queued have been consumed.
    Disconnect,
}

impl OverflowPolicy {
    /// Canonical configuration name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DropNewest => "drop-newest",
            Self::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = ParseOverflowPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop-newest" | "drop_newest" | "drop" => Ok(Self::DropNewest),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(ParseOverflowPolicyError(other.to_owned())),
        }
    }
}

/// Queue settings applied to every subscription of a broadcaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastConfig {
    /// Maximum number of undelivered events per subscriber.
    /// `None` means unbounded. Values above [`MAX_QUEUE_CAPACITY`] are
    /// clamped when a queue is created; prefer [`BroadcastConfig::bounded`],
    /// which rejects them.
    pub queue_capacity: Option<NonZeroUsize>,
    /// Behaviour when a bounded queue is full. Ignored when unbounded.
    pub overflow: OverflowPolicy,
}

impl BroadcastConfig {
    /// Unbounded per-subscriber queues.
    pub const fn unbounded() -> Self {
        Self {
            queue_capacity: None,
            overflow: OverflowPolicy::DropNewest,
        }
    }

    /// Queues bounded at `capacity` events, with the given overflow policy.
    ///
    /// # Errors
    ///
    /// Returns [`QueueCapacityError`] if `capacity` exceeds
    /// [`MAX_QUEUE_CAPACITY`].
    pub const fn bounded(
        capacity: NonZeroUsize,
        overflow: OverflowPolicy,
    ) -> Result<Self, QueueCapacityError> {
        if capacity.get() > MAX_QUEUE_CAPACITY {
            return Err(QueueCapacityError {
                requested: capacity.get(),
            });
        }
        Ok(Self {
            queue_capacity: Some(capacity),
            overflow,
        })
    }
}
