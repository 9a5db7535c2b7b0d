//! Overflow policies for the bounded delivery channel
//!
//! When the delivery channel is full, the policy decides whether the
//! producer waits for the dispatcher or a record is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Policy for handling a full delivery channel
///
/// # Example
///
/// ```
/// use rust_log_pipeline::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: producers wait, nothing is lost
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::Block);
///
/// // Wait a bounded time, then drop
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Block until space is available
    ///
    /// No record is ever dropped, at the cost of stalling producers while
    /// the dispatcher is behind.
    #[default]
    Block,

    /// Block with timeout, then drop the incoming record
    BlockWithTimeout(Duration),

    /// Drop the incoming record immediately
    DropNewest,

    /// Evict the oldest queued record to make room for the incoming one
    DropOldest,
}

impl OverflowPolicy {
    /// Whether a producer may wait on a full channel under this policy
    pub fn may_block(&self) -> bool {
        matches!(
            self,
            OverflowPolicy::Block | OverflowPolicy::BlockWithTimeout(_)
        )
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
        }
    }
}
