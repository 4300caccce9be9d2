//! The two shared collections.
//!
//! `ListStore` is only ever mutated inside a queue flush, which holds the
//! write half of [`SharedStore`] for the whole batch. Readers take the read
//! half and copy out, so a half-applied batch is never observable.

mod collection;

pub use collection::OrderedCollection;

use std::sync::Arc;
use tokio::sync::RwLock;

use duallist_types::models::StoreStats;
use duallist_types::{Item, ListKind};

/// Store handle shared by the dispatcher and both queues.
pub type SharedStore = Arc<RwLock<ListStore>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStore {
    available: OrderedCollection,
    selected: OrderedCollection,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// "All items" holds ids "1".."count"; nothing is selected.
    pub fn seeded(count: usize) -> Self {
        Self { available: OrderedCollection::seeded(count), selected: OrderedCollection::new() }
    }

    /// Build from explicit id lists. An id listed in both keeps only its
    /// "all items" membership.
    pub fn with_ids<A, S>(available: A, selected: S) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let available = OrderedCollection::from_items(available.into_iter().map(Item::new));
        let selected = OrderedCollection::from_items(
            selected.into_iter().map(Item::new).filter(|item| !available.contains(&item.id)),
        );
        Self { available, selected }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn collection(&self, kind: ListKind) -> &OrderedCollection {
        match kind {
            ListKind::Available => &self.available,
            ListKind::Selected => &self.selected,
        }
    }

    pub fn collection_mut(&mut self, kind: ListKind) -> &mut OrderedCollection {
        match kind {
            ListKind::Available => &mut self.available,
            ListKind::Selected => &mut self.selected,
        }
    }

    pub fn available(&self) -> &OrderedCollection {
        &self.available
    }

    pub fn selected(&self) -> &OrderedCollection {
        &self.selected
    }

    /// Which collection currently holds `id`.
    pub fn locate(&self, id: &str) -> Option<ListKind> {
        if self.available.contains(id) {
            Some(ListKind::Available)
        } else if self.selected.contains(id) {
            Some(ListKind::Selected)
        } else {
            None
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats { available: self.available.len(), selected: self.selected.len() }
    }
}
