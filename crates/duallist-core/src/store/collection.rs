//! Ordered, id-indexed item sequence.

use std::collections::{HashMap, HashSet};

use duallist_types::Item;

/// An ordered sequence of items with O(1) membership tests.
///
/// Positions are found by linear scan; the `members` set only answers
/// "is this id here" and is kept in step with `items` by every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCollection {
    items: Vec<Item>,
    members: HashSet<String>,
}

impl OrderedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence; repeated ids keep their first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(items);
        collection
    }

    /// Items with ids "1" through `count`, in order.
    pub fn seeded(count: usize) -> Self {
        let items: Vec<Item> = (1..=count).map(|n| Item::new(n.to_string())).collect();
        let members = items.iter().map(|item| item.id.clone()).collect();
        Self { items, members }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn find_index(&self, id: &str) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.items.iter().position(|item| item.id == id)
    }

    /// Insert at `index`, clamped to the end. Returns false and leaves the
    /// collection untouched if the id is already a member.
    pub fn insert_at(&mut self, item: Item, index: usize) -> bool {
        if self.members.contains(&item.id) {
            return false;
        }
        let index = index.min(self.items.len());
        self.members.insert(item.id.clone());
        self.items.insert(index, item);
        true
    }

    pub fn push_front(&mut self, item: Item) -> bool {
        self.insert_at(item, 0)
    }

    pub fn push_back(&mut self, item: Item) -> bool {
        let end = self.items.len();
        self.insert_at(item, end)
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Item> {
        let index = self.find_index(id)?;
        self.members.remove(id);
        Some(self.items.remove(index))
    }

    /// Swap in a whole new sequence. Repeated ids keep their first occurrence.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = Item>) {
        let mut members = HashSet::new();
        let items: Vec<Item> =
            items.into_iter().filter(|item| members.insert(item.id.clone())).collect();
        self.items = items;
        self.members = members;
    }

    /// Move `from_id` to just before `to_id`, or to the tail when `to_id` is
    /// absent or not a member. Returns false if `from_id` is not a member.
    pub fn move_before(&mut self, from_id: &str, to_id: Option<&str>) -> bool {
        if to_id == Some(from_id) {
            return self.contains(from_id);
        }
        let Some(item) = self.remove_by_id(from_id) else {
            return false;
        };
        let index = to_id.and_then(|target| self.find_index(target)).unwrap_or(self.items.len());
        self.insert_at(item, index)
    }

    /// Put the listed ids first, in the given order, followed by every
    /// unlisted item in its current relative order. Unknown ids are ignored
    /// and no item is ever dropped. Returns how many items were placed by the
    /// explicit order.
    pub fn arrange(&mut self, ordered_ids: &[String]) -> usize {
        let mut rank: HashMap<&str, usize> = HashMap::with_capacity(ordered_ids.len());
        for (position, id) in ordered_ids.iter().enumerate() {
            rank.entry(id.as_str()).or_insert(position);
        }

        let current = std::mem::take(&mut self.items);
        let (mut listed, rest): (Vec<Item>, Vec<Item>) =
            current.into_iter().partition(|item| rank.contains_key(item.id.as_str()));
        listed.sort_by_key(|item| rank.get(item.id.as_str()).copied().unwrap_or(usize::MAX));

        let placed = listed.len();
        listed.extend(rest);
        self.items = listed;
        placed
    }

    /// Items matching `filter` (substring of id), skipping `offset`, at most `limit`.
    pub fn page(&self, filter: Option<&str>, offset: usize, limit: usize) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| filter.map_or(true, |needle| item.id.contains(needle)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}
