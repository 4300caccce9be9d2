//! Per-id in-flight marks for queued add/select/deselect mutations.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Which kind of mutation holds the mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlightKind {
    Add,
    Select,
    Deselect,
}

/// `Idle -> InFlight` when a mutation for the id is queued,
/// `InFlight -> Idle` when the flush applies (or drops) it.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    entries: DashMap<String, InFlightKind>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` in flight. Returns the kind already holding the mark if
    /// there is one, leaving it untouched.
    pub fn try_mark(&self, id: &str, kind: InFlightKind) -> Result<(), InFlightKind> {
        match self.entries.entry(id.to_string()) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                slot.insert(kind);
                Ok(())
            },
        }
    }

    pub fn release(&self, id: &str) -> Option<InFlightKind> {
        self.entries.remove(id).map(|(_, kind)| kind)
    }

    pub fn kind_of(&self, id: &str) -> Option<InFlightKind> {
        self.entries.get(id).map(|entry| *entry.value())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_release_cycle() {
        let registry = InFlightRegistry::new();
        assert_eq!(registry.try_mark("2", InFlightKind::Select), Ok(()));
        assert_eq!(registry.try_mark("2", InFlightKind::Deselect), Err(InFlightKind::Select));
        assert_eq!(registry.kind_of("2"), Some(InFlightKind::Select));
        assert_eq!(registry.release("2"), Some(InFlightKind::Select));
        assert!(!registry.contains("2"));
        assert_eq!(registry.try_mark("2", InFlightKind::Deselect), Ok(()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let registry = InFlightRegistry::new();
        assert_eq!(registry.release("missing"), None);
        assert!(registry.is_empty());
    }
}
