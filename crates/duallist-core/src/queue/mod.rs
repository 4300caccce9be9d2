//! Deferred, deduplicating mutation queue.
//!
//! Mutations are registered under a dedup key and applied in batches, either
//! on a fixed interval by the loop spawned with [`MutationQueue::start`] or on
//! demand through [`MutationQueue::flush_now`].
//!
//! Guarantees:
//! - a later enqueue under the same key replaces the pending mutation and
//!   moves it to the end of the batch order
//! - one flush per queue at a time; a second request while one runs is a no-op
//! - cancelling a flush before it holds the store leaves the pending set intact
//! - a batch applies in registration order under a single store write lock
//! - a failing mutation is logged and dropped; the rest of the batch still applies
#![allow(clippy::arithmetic_side_effects, reason = "counter increments")]

mod in_flight;
mod mutation;

#[cfg(test)]
mod tests;

pub use in_flight::{InFlightKind, InFlightRegistry};
pub use mutation::{Anchor, ApplyOutcome, Mutation};
pub(crate) use mutation::reorder_key;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex as AsyncMutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use duallist_types::models::{FlushReport, QueueStats};

use crate::store::SharedStore;

/// Result of [`MutationQueue::enqueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// Replaced a pending mutation registered under the same key
    Superseded,
}

/// Result of [`MutationQueue::flush_now`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was pending
    Idle,
    /// Another flush of this queue is running; nothing was done
    AlreadyRunning,
    Flushed(FlushReport),
}

impl FlushOutcome {
    pub fn report(&self) -> Option<&FlushReport> {
        match self {
            Self::Flushed(report) => Some(report),
            Self::Idle | Self::AlreadyRunning => None,
        }
    }
}

#[derive(Debug, Default)]
struct QueueCounters {
    flushes: AtomicU64,
    applied: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    superseded: AtomicU64,
}

/// Holds `flushing` high for as long as it lives.
struct FlushingFlag<'a>(&'a AtomicBool);

impl<'a> FlushingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for FlushingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct MutationQueue {
    name: String,
    flush_interval: Duration,
    store: SharedStore,
    in_flight: Arc<InFlightRegistry>,
    pending: Mutex<IndexMap<String, Mutation>>,
    flush_guard: AsyncMutex<()>,
    flushing: AtomicBool,
    counters: QueueCounters,
    last_flush_at: Mutex<Option<DateTime<Utc>>>,
}

impl MutationQueue {
    pub fn new(
        name: impl Into<String>,
        flush_interval: Duration,
        store: SharedStore,
        in_flight: Arc<InFlightRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            flush_interval,
            store,
            in_flight,
            pending: Mutex::new(IndexMap::new()),
            flush_guard: AsyncMutex::new(()),
            flushing: AtomicBool::new(false),
            counters: QueueCounters::default(),
            last_flush_at: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }

    /// Register `mutation` for the next flush. Never blocks on a running flush.
    pub fn enqueue(&self, mutation: Mutation) -> EnqueueOutcome {
        let key = mutation.key();
        let superseded = {
            let mut pending = self.pending.lock();
            let superseded = pending.shift_remove(&key).is_some();
            pending.insert(key.clone(), mutation);
            superseded
        };

        if superseded {
            self.counters.superseded.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("[MutationQueue:{}] Superseded pending task {}", self.name, key);
            EnqueueOutcome::Superseded
        } else {
            tracing::trace!("[MutationQueue:{}] Queued task {}", self.name, key);
            EnqueueOutcome::Queued
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.lock().contains_key(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Pending keys in the order they will be applied.
    pub fn pending_keys(&self) -> Vec<String> {
        self.pending.lock().keys().cloned().collect()
    }

    pub fn is_flushing(&self) -> bool {
        self.flushing.load(Ordering::Acquire)
    }

    /// Flush immediately unless a flush of this queue is already running.
    pub async fn flush_now(&self) -> FlushOutcome {
        let Ok(guard) = self.flush_guard.try_lock() else {
            tracing::debug!("[MutationQueue:{}] Flush already in progress, skipping", self.name);
            return FlushOutcome::AlreadyRunning;
        };
        self.flush_locked(guard).await
    }

    /// Wait for any running flush, then apply whatever is still pending.
    pub async fn drain(&self) -> FlushOutcome {
        let guard = self.flush_guard.lock().await;
        self.flush_locked(guard).await
    }

    async fn flush_locked(&self, _guard: MutexGuard<'_, ()>) -> FlushOutcome {
        if self.pending_len() == 0 {
            return FlushOutcome::Idle;
        }

        let _flushing = FlushingFlag::raise(&self.flushing);
        let started = Instant::now();

        // Take the batch only once the store is held: nothing awaits after
        // this point, so a dropped flush never loses pending work.
        let mut store = self.store.write().await;
        let batch = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return FlushOutcome::Idle;
        }
        tracing::info!("[MutationQueue:{}] Flushing {} tasks", self.name, batch.len());

        let mut report = FlushReport { queue: self.name.clone(), ..FlushReport::default() };
        for (key, mutation) in batch {
            match mutation.apply(&mut store) {
                Ok(ApplyOutcome::Changed) => report.applied += 1,
                Ok(ApplyOutcome::Skipped(reason)) => {
                    report.skipped += 1;
                    tracing::debug!(
                        "[MutationQueue:{}] Task {} skipped: {}",
                        self.name,
                        key,
                        reason
                    );
                },
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("[MutationQueue:{}] Task {} failed: {}", self.name, key, e);
                },
            }
            if let Some(id) = mutation.tracked_id() {
                self.in_flight.release(id);
            }
        }
        drop(store);

        report.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.counters.flushes.fetch_add(1, Ordering::Relaxed);
        self.counters.applied.fetch_add(report.applied as u64, Ordering::Relaxed);
        self.counters.skipped.fetch_add(report.skipped as u64, Ordering::Relaxed);
        self.counters.failed.fetch_add(report.failed as u64, Ordering::Relaxed);
        *self.last_flush_at.lock() = Some(Utc::now());

        tracing::debug!(
            "[MutationQueue:{}] Flush done: {} applied, {} skipped, {} failed in {}ms",
            self.name,
            report.applied,
            report.skipped,
            report.failed,
            report.duration_ms
        );
        FlushOutcome::Flushed(report)
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            name: self.name.clone(),
            pending: self.pending_len(),
            flushing: self.is_flushing(),
            flush_interval_ms: u64::try_from(self.flush_interval.as_millis()).unwrap_or(u64::MAX),
            total_flushes: self.counters.flushes.load(Ordering::Relaxed),
            total_applied: self.counters.applied.load(Ordering::Relaxed),
            total_skipped: self.counters.skipped.load(Ordering::Relaxed),
            total_failed: self.counters.failed.load(Ordering::Relaxed),
            total_superseded: self.counters.superseded.load(Ordering::Relaxed),
            last_flush_at: *self.last_flush_at.lock(),
        }
    }

    /// Spawn the periodic flush loop.
    ///
    /// The next tick is scheduled only after the previous flush completes.
    /// When `shutdown` flips to true the loop drains what is left and exits.
    pub fn start(self: &Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let queue = Arc::clone(self);
        tokio::spawn(async move {
            tracing::info!(
                "[MutationQueue:{}] Flush loop started (every {}ms)",
                queue.name,
                queue.flush_interval.as_millis()
            );

            let mut ticker = interval(queue.flush_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if queue.pending_len() > 0 {
                            queue.flush_now().await;
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            if let FlushOutcome::Flushed(report) = queue.drain().await {
                tracing::info!(
                    "[MutationQueue:{}] Final drain applied {} of {} tasks",
                    queue.name,
                    report.applied,
                    report.total()
                );
            }
            tracing::info!("[MutationQueue:{}] Flush loop stopped", queue.name);
        })
    }
}
