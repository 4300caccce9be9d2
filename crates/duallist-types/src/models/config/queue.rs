//! Mutation queue cadence and capacity.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Flush intervals of the two mutation queues.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct QueueConfig {
    /// Add queue flush interval in milliseconds
    #[validate(range(min = 10_u64, max = 3_600_000_u64))]
    #[serde(default = "default_add_flush_ms")]
    pub add_flush_ms: u64,
    /// Update queue (select/deselect/reorder) flush interval in milliseconds
    #[validate(range(min = 10_u64, max = 3_600_000_u64))]
    #[serde(default = "default_update_flush_ms")]
    pub update_flush_ms: u64,
    /// Per-queue cap on pending mutations; None = unbounded
    #[validate(range(min = 1_usize))]
    #[serde(default)]
    pub max_pending: Option<usize>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            add_flush_ms: default_add_flush_ms(),
            update_flush_ms: default_update_flush_ms(),
            max_pending: None,
        }
    }
}

const fn default_add_flush_ms() -> u64 {
    10_000
}

const fn default_update_flush_ms() -> u64 {
    1_000
}
