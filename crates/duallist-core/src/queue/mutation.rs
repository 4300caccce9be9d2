//! Tagged mutation operations and how each one applies to the store.

use duallist_types::models::AddPlacement;
use duallist_types::{Item, ListKind};

use crate::error::{ApplyError, ApplyResult};
use crate::store::{ListStore, OrderedCollection};

/// Insert position in the destination collection of a select/deselect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Just before this id; falls back to the tail if it is gone by flush time
    Before(String),
    /// At this index, clamped to the tail
    Index(usize),
    #[default]
    Tail,
}

impl Anchor {
    /// Anchor id wins over a position; blank ids and negative positions mean tail.
    pub fn from_request(anchor_id: Option<String>, target_index: Option<i64>) -> Self {
        if let Some(id) = anchor_id.filter(|id| !id.is_empty()) {
            return Self::Before(id);
        }
        match target_index.and_then(|index| usize::try_from(index).ok()) {
            Some(index) => Self::Index(index),
            None => Self::Tail,
        }
    }

    pub fn resolve(&self, target: &OrderedCollection) -> usize {
        match self {
            Self::Before(id) => target.find_index(id).unwrap_or(target.len()),
            Self::Index(index) => (*index).min(target.len()),
            Self::Tail => target.len(),
        }
    }
}

/// A deferred write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add { id: String, placement: AddPlacement },
    Select { id: String, anchor: Anchor },
    Deselect { id: String, anchor: Anchor },
    /// Move one item within `list` before `to_id`, or to the tail
    Reorder { list: ListKind, from_id: String, to_id: Option<String> },
    /// Impose an explicit order on `list`
    Arrange { list: ListKind, ordered_ids: Vec<String> },
}

/// What applying a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Changed,
    /// Valid but nothing to do at flush time
    Skipped(&'static str),
}

pub(crate) fn reorder_key(list: ListKind) -> &'static str {
    match list {
        ListKind::Selected => "reorder",
        ListKind::Available => "reorder-all",
    }
}

impl Mutation {
    /// Dedup key: a later mutation with the same key replaces a pending one.
    pub fn key(&self) -> String {
        match self {
            Self::Add { id, .. } => format!("add:{id}"),
            Self::Select { id, .. } => format!("select:{id}"),
            Self::Deselect { id, .. } => format!("deselect:{id}"),
            Self::Reorder { list, .. } | Self::Arrange { list, .. } => {
                reorder_key(*list).to_string()
            },
        }
    }

    /// Id whose in-flight mark this mutation clears once applied.
    pub fn tracked_id(&self) -> Option<&str> {
        match self {
            Self::Add { id, .. } | Self::Select { id, .. } | Self::Deselect { id, .. } => Some(id),
            Self::Reorder { .. } | Self::Arrange { .. } => None,
        }
    }

    pub fn apply(&self, store: &mut ListStore) -> ApplyResult<ApplyOutcome> {
        match self {
            Self::Add { id, placement } => {
                if let Some(list) = store.locate(id) {
                    return Err(ApplyError::Duplicate { id: id.clone(), list });
                }
                let available = store.collection_mut(ListKind::Available);
                let item = Item::new(id.clone());
                match placement {
                    AddPlacement::Front => available.push_front(item),
                    AddPlacement::Back => available.push_back(item),
                };
                Ok(ApplyOutcome::Changed)
            },
            Self::Select { id, anchor } => Ok(transfer(store, id, ListKind::Available, anchor)),
            Self::Deselect { id, anchor } => Ok(transfer(store, id, ListKind::Selected, anchor)),
            Self::Reorder { list, from_id, to_id } => {
                let collection = store.collection_mut(*list);
                if !collection.move_before(from_id, to_id.as_deref()) {
                    return Err(ApplyError::MissingItem { id: from_id.clone(), list: *list });
                }
                Ok(ApplyOutcome::Changed)
            },
            Self::Arrange { list, ordered_ids } => {
                if store.collection_mut(*list).arrange(ordered_ids) == 0 {
                    return Ok(ApplyOutcome::Skipped("no listed id is in the collection"));
                }
                Ok(ApplyOutcome::Changed)
            },
        }
    }
}

fn transfer(store: &mut ListStore, id: &str, from: ListKind, anchor: &Anchor) -> ApplyOutcome {
    let to = from.opposite();
    if store.collection(to).contains(id) {
        return ApplyOutcome::Skipped("already in destination");
    }
    let Some(item) = store.collection_mut(from).remove_by_id(id) else {
        return ApplyOutcome::Skipped("not in source");
    };
    let target = store.collection_mut(to);
    let index = anchor.resolve(target);
    target.insert_at(item, index);
    ApplyOutcome::Changed
}
