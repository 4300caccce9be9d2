//! Item handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use serde::{Deserialize, Serialize};

use duallist_core::dispatcher::{ADD_QUEUE, UPDATE_QUEUE};
use duallist_core::{Anchor, FlushOutcome};
use duallist_types::models::{
    AddRequest, FlushReport, MoveRequest, QueueStats, ReorderRequest, StoreStats,
};
use duallist_types::{Item, ListKind, ListQuery, MutationError, QueuedResponse};

use super::ApiError;
use crate::state::AppState;

/// One queue's result in the `POST /items/flush` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlushEntry {
    pub queue: String,
    /// `flushed`, `idle` or `already_running`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<FlushReport>,
}

impl FlushEntry {
    fn from_outcome(queue: &str, outcome: FlushOutcome) -> Self {
        let (status, report) = match outcome {
            FlushOutcome::Idle => ("idle", None),
            FlushOutcome::AlreadyRunning => ("already_running", None),
            FlushOutcome::Flushed(report) => ("flushed", Some(report)),
        };
        Self { queue: queue.to_string(), status: status.to_string(), report }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub store: StoreStats,
    pub queues: Vec<QueueStats>,
    pub in_flight: usize,
    pub uptime_secs: i64,
}

pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.dispatcher().list(&query).await))
}

pub async fn add_item(
    State(state): State<AppState>,
    body: Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<QueuedResponse>, ApiError> {
    let Json(request) = body?;
    let response = state.dispatcher().add(request.id.as_deref()).await?;
    Ok(Json(response))
}

pub async fn select_item(
    State(state): State<AppState>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<QueuedResponse>, ApiError> {
    let Json(request) = body?;
    let anchor = Anchor::from_request(request.anchor_id, request.target_index);
    Ok(Json(state.dispatcher().select(request.id.as_deref(), anchor)?))
}

pub async fn deselect_item(
    State(state): State<AppState>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<QueuedResponse>, ApiError> {
    let Json(request) = body?;
    let anchor = Anchor::from_request(request.anchor_id, request.target_index);
    Ok(Json(state.dispatcher().deselect(request.id.as_deref(), anchor)?))
}

pub async fn reorder_selected(
    State(state): State<AppState>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<QueuedResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(reorder(&state, ListKind::Selected, request).await?))
}

pub async fn reorder_available(
    State(state): State<AppState>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<QueuedResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(reorder(&state, ListKind::Available, request).await?))
}

async fn reorder(
    state: &AppState,
    list: ListKind,
    request: ReorderRequest,
) -> Result<QueuedResponse, MutationError> {
    let dispatcher = state.dispatcher();
    match request {
        ReorderRequest::Move { from_id, to_id } => match list {
            ListKind::Selected => dispatcher.reorder(Some(&from_id), to_id.as_deref()).await,
            ListKind::Available => dispatcher.reorder_all(Some(&from_id), to_id.as_deref()).await,
        },
        ReorderRequest::Arrange { ordered_ids } => dispatcher.arrange(list, ordered_ids),
    }
}

pub async fn flush_queues(State(state): State<AppState>) -> Json<Vec<FlushEntry>> {
    let outcomes = state.dispatcher().flush().await;
    let entries = [ADD_QUEUE, UPDATE_QUEUE]
        .into_iter()
        .zip(outcomes)
        .map(|(queue, outcome)| FlushEntry::from_outcome(queue, outcome))
        .collect();
    Json(entries)
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let dispatcher = state.dispatcher();
    Json(StatsResponse {
        store: dispatcher.store_stats().await,
        queues: dispatcher.queue_stats(),
        in_flight: dispatcher.in_flight().len(),
        uptime_secs: state.uptime_secs(),
    })
}
