//! Request and response bodies of the mutation endpoints.

use serde::{Deserialize, Serialize};

/// `POST /items/add`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST /items/select` and `POST /items/deselect`
///
/// `anchorId` places the item just before that id in the destination list.
/// `targetIndex` is accepted for clients that send a position instead;
/// negative indices are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub anchor_id: Option<String>,
    #[serde(default)]
    pub target_index: Option<i64>,
}

/// `POST /items/reorder` and `POST /items/reorder-all`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReorderRequest {
    /// Full desired order; unlisted items keep their relative order after it
    Arrange {
        #[serde(rename = "orderedIds")]
        ordered_ids: Vec<String>,
    },
    /// Move one item before `toId`, or to the tail
    Move {
        #[serde(rename = "fromId")]
        from_id: String,
        #[serde(rename = "toId", default)]
        to_id: Option<String>,
    },
}

/// Acknowledgement that an intent was accepted and will apply on a later flush.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueuedResponse {
    pub queued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl QueuedResponse {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self { queued: true, id: Some(id.into()) }
    }

    pub fn batch() -> Self {
        Self { queued: true, id: None }
    }
}
