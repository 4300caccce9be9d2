//! Errors raised while applying a flushed mutation.
//!
//! These never reach an HTTP caller: the request that queued the mutation
//! has already been answered. The queue logs them and moves on.

use duallist_types::ListKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    /// Id became a member of a collection between validation and flush.
    #[error("item {id} already exists in {list}")]
    Duplicate { id: String, list: ListKind },

    /// Item to move disappeared between validation and flush.
    #[error("item {id} is no longer in {list}")]
    MissingItem { id: String, list: ListKind },
}

/// Result type alias for applying one mutation.
pub type ApplyResult<T> = Result<T, ApplyError>;
