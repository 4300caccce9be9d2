//! Errors returned synchronously when a mutation intent is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ListKind;

/// Reasons an add/select/deselect/reorder intent is refused before it is queued.
///
/// None of these are ever raised for a mutation that was already accepted;
/// failures during a flush are logged by the queue instead.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum MutationError {
    /// Required id field was absent or blank
    #[error("Missing ID!")]
    MissingId,

    /// Id already present in a collection or pending in an un-flushed add
    #[error("Item with ID {id} already exists!")]
    DuplicateId { id: String },

    /// Referenced id is not a member of the target collection
    #[error("Item {id} not found in {list}")]
    NotFound { id: String, list: ListKind },

    /// A select/deselect/add for this id is queued and not yet applied
    #[error("Item {id} is already being processed")]
    AlreadyProcessing { id: String },

    /// Pending set reached its configured capacity
    #[error("Queue {queue} is full ({capacity} pending mutations)")]
    QueueFull { queue: String, capacity: usize },

    /// Request body was structurally invalid
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl MutationError {
    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::QueueFull { .. })
    }

    /// Conflicts are non-fatal: the caller may simply retry later.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyProcessing { .. })
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingId | Self::DuplicateId { .. } | Self::InvalidRequest { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::AlreadyProcessing { .. } => 409,
            Self::QueueFull { .. } => 503,
        }
    }

    /// Stable machine-readable kind for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingId => "missing_id",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::NotFound { .. } => "not_found",
            Self::AlreadyProcessing { .. } => "already_processing",
            Self::QueueFull { .. } => "queue_full",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }
}
