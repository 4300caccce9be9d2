//! Intent validation and routing into the mutation queues.
//!
//! Every intent is checked against the state committed by earlier flushes,
//! not against the state that will exist when its own batch runs. Between
//! the two points in time the in-flight registry is the only view of what
//! is queued:
//! - a second add of the same id before the flush is a `DuplicateId`
//! - a second select/deselect of the same id before the flush is `AlreadyProcessing`
//! - reorders collapse by key, so only the latest requested move applies


use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use duallist_types::models::{AddPlacement, QueueStats, StoreStats};
use duallist_types::{AppConfig, Item, ListKind, ListQuery, MutationError, QueuedResponse};

use crate::queue::{
    reorder_key, Anchor, FlushOutcome, InFlightKind, InFlightRegistry, Mutation, MutationQueue,
};
use crate::store::{ListStore, SharedStore};

pub const ADD_QUEUE: &str = "add";
pub const UPDATE_QUEUE: &str = "update";

/// Knobs the dispatcher applies when accepting intents and serving reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    pub add_placement: AddPlacement,
    pub max_pending: Option<usize>,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl DispatchPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            add_placement: config.store.add_placement,
            max_pending: config.queue.max_pending,
            default_limit: config.pagination.default_limit,
            max_limit: config.pagination.max_limit,
        }
    }
}

pub struct MutationDispatcher {
    store: SharedStore,
    in_flight: Arc<InFlightRegistry>,
    add_queue: Arc<MutationQueue>,
    update_queue: Arc<MutationQueue>,
    policy: DispatchPolicy,
}

impl MutationDispatcher {
    pub fn new(store: ListStore, config: &AppConfig) -> Self {
        let store = store.into_shared();
        let in_flight = Arc::new(InFlightRegistry::new());
        let add_queue = Arc::new(MutationQueue::new(
            ADD_QUEUE,
            Duration::from_millis(config.queue.add_flush_ms),
            store.clone(),
            in_flight.clone(),
        ));
        let update_queue = Arc::new(MutationQueue::new(
            UPDATE_QUEUE,
            Duration::from_millis(config.queue.update_flush_ms),
            store.clone(),
            in_flight.clone(),
        ));

        let policy = DispatchPolicy::from_config(config);
        Self { store, in_flight, add_queue, update_queue, policy }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }

    pub fn add_queue(&self) -> &Arc<MutationQueue> {
        &self.add_queue
    }

    pub fn update_queue(&self) -> &Arc<MutationQueue> {
        &self.update_queue
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Spawn both periodic flush loops.
    pub fn start(&self, shutdown: &watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        vec![self.add_queue.start(shutdown.clone()), self.update_queue.start(shutdown.clone())]
    }

    /// Queue an item for insertion into "all items".
    pub async fn add(&self, id: Option<&str>) -> Result<QueuedResponse, MutationError> {
        let id = require_id(id)?;
        if self.in_flight.kind_of(id) == Some(InFlightKind::Add)
            || self.store.read().await.contains(id)
        {
            return Err(MutationError::DuplicateId { id: id.to_string() });
        }
        let mutation = Mutation::Add { id: id.to_string(), placement: self.policy.add_placement };
        self.check_capacity(&self.add_queue, &mutation.key())?;
        self.mark(id, InFlightKind::Add)?;

        self.add_queue.enqueue(mutation);
        tracing::debug!("[Dispatcher] Add {} queued", id);
        Ok(QueuedResponse::for_id(id))
    }

    /// Queue a move from "all items" into "selected".
    pub fn select(
        &self,
        id: Option<&str>,
        anchor: Anchor,
    ) -> Result<QueuedResponse, MutationError> {
        let id = require_id(id)?;
        let mutation = Mutation::Select { id: id.to_string(), anchor };
        self.transfer(mutation, id, InFlightKind::Select)
    }

    /// Queue a move from "selected" back into "all items".
    pub fn deselect(
        &self,
        id: Option<&str>,
        anchor: Anchor,
    ) -> Result<QueuedResponse, MutationError> {
        let id = require_id(id)?;
        let mutation = Mutation::Deselect { id: id.to_string(), anchor };
        self.transfer(mutation, id, InFlightKind::Deselect)
    }

    /// Move one item within "selected".
    pub async fn reorder(
        &self,
        from_id: Option<&str>,
        to_id: Option<&str>,
    ) -> Result<QueuedResponse, MutationError> {
        self.reorder_in(ListKind::Selected, from_id, to_id).await
    }

    /// Move one item within "all items".
    pub async fn reorder_all(
        &self,
        from_id: Option<&str>,
        to_id: Option<&str>,
    ) -> Result<QueuedResponse, MutationError> {
        self.reorder_in(ListKind::Available, from_id, to_id).await
    }

    /// Impose an explicit order on `list`. Shares the list's reorder key.
    pub fn arrange(
        &self,
        list: ListKind,
        ordered_ids: Vec<String>,
    ) -> Result<QueuedResponse, MutationError> {
        let mutation = Mutation::Arrange { list, ordered_ids };
        self.check_capacity(&self.update_queue, &mutation.key())?;
        self.update_queue.enqueue(mutation);
        Ok(QueuedResponse::batch())
    }

    async fn reorder_in(
        &self,
        list: ListKind,
        from_id: Option<&str>,
        to_id: Option<&str>,
    ) -> Result<QueuedResponse, MutationError> {
        let from_id = require_id(from_id)?;
        if !self.store.read().await.collection(list).contains(from_id) {
            return Err(MutationError::NotFound { id: from_id.to_string(), list });
        }
        self.check_capacity(&self.update_queue, reorder_key(list))?;

        self.update_queue.enqueue(Mutation::Reorder {
            list,
            from_id: from_id.to_string(),
            to_id: to_id.filter(|id| !id.is_empty()).map(str::to_string),
        });
        Ok(QueuedResponse::batch())
    }

    fn transfer(
        &self,
        mutation: Mutation,
        id: &str,
        kind: InFlightKind,
    ) -> Result<QueuedResponse, MutationError> {
        self.check_capacity(&self.update_queue, &mutation.key())?;
        self.mark(id, kind)?;
        self.update_queue.enqueue(mutation);
        Ok(QueuedResponse::for_id(id))
    }

    fn mark(&self, id: &str, kind: InFlightKind) -> Result<(), MutationError> {
        match self.in_flight.try_mark(id, kind) {
            Ok(()) => Ok(()),
            Err(InFlightKind::Add) if kind == InFlightKind::Add => {
                Err(MutationError::DuplicateId { id: id.to_string() })
            },
            Err(_) => {
                tracing::debug!("[Dispatcher] {} already in flight, rejecting", id);
                Err(MutationError::AlreadyProcessing { id: id.to_string() })
            },
        }
    }

    /// Reject new keys once a queue holds `max_pending` mutations.
    /// Superseding an existing key never grows the queue and is always allowed.
    fn check_capacity(&self, queue: &MutationQueue, key: &str) -> Result<(), MutationError> {
        let Some(capacity) = self.policy.max_pending else {
            return Ok(());
        };
        if queue.pending_len() >= capacity && !queue.is_pending(key) {
            tracing::warn!("[Dispatcher] Queue {} full ({} pending)", queue.name(), capacity);
            return Err(MutationError::QueueFull { queue: queue.name().to_string(), capacity });
        }
        Ok(())
    }

    /// Paginated read of committed state; pending mutations are not visible.
    pub async fn list(&self, query: &ListQuery) -> Vec<Item> {
        let limit = query.effective_limit(self.policy.default_limit, self.policy.max_limit);
        let offset = (query.page_number() - 1).saturating_mul(limit);
        let store = self.store.read().await;
        store.collection(query.kind()).page(query.filter_text(), offset, limit)
    }

    /// Flush the add queue, then the update queue, without waiting for a tick.
    pub async fn flush(&self) -> Vec<FlushOutcome> {
        vec![self.add_queue.flush_now().await, self.update_queue.flush_now().await]
    }

    /// Wait out running flushes and apply everything still pending.
    pub async fn drain(&self) -> Vec<FlushOutcome> {
        vec![self.add_queue.drain().await, self.update_queue.drain().await]
    }

    pub async fn store_stats(&self) -> StoreStats {
        self.store.read().await.stats()
    }

    pub fn queue_stats(&self) -> Vec<QueueStats> {
        vec![self.add_queue.stats(), self.update_queue.stats()]
    }
}

fn require_id(id: Option<&str>) -> Result<&str, MutationError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(MutationError::MissingId),
    }
}
