//! Statistics and monitoring models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one flush of a mutation queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Queue name
    pub queue: String,
    /// Mutations that changed the collections
    pub applied: usize,
    /// Mutations that were valid no-ops at apply time
    pub skipped: usize,
    /// Mutations dropped because applying them failed
    pub failed: usize,
    /// Wall time spent applying the batch
    pub duration_ms: u64,
}

impl FlushReport {
    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.failed
    }
}

/// Cumulative counters of a mutation queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QueueStats {
    pub name: String,
    pub pending: usize,
    pub flushing: bool,
    pub flush_interval_ms: u64,
    pub total_flushes: u64,
    pub total_applied: u64,
    pub total_skipped: u64,
    pub total_failed: u64,
    /// Enqueues that replaced a pending mutation under the same key
    pub total_superseded: u64,
    pub last_flush_at: Option<DateTime<Utc>>,
}

/// Current collection sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub available: usize,
    pub selected: usize,
}
