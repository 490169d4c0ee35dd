//! In-memory registry of pending and completed digests.
//!
//! The registry owns identifier allocation. Entries live in an arena indexed
//! by `EntryId`, so the arena length doubles as the allocation counter and a
//! single `RwLock` keeps `reserve`, `complete`, and `lookup` linearizable.
//! Lookups take the read side and proceed in parallel.

use std::sync::RwLock;

use hashery_types::entry::{EntryId, EntryState};

/// Thread-safe store mapping identifiers to their digest state.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<Vec<EntryState>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier and mark it pending.
    pub fn reserve(&self) -> EntryId {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        let id = EntryId(entries.len() as u64);
        entries.push(EntryState::Pending);
        id
    }

    /// Store the final digest for `id`.
    ///
    /// Each id has exactly one writer (its completion task). Completing an id
    /// that was never reserved is ignored.
    pub fn complete(&self, id: EntryId, digest: String) {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        match id.index().and_then(|i| entries.get_mut(i)) {
            Some(slot) => *slot = EntryState::Ready(digest),
            None => tracing::warn!(%id, "ignoring completion for unreserved entry"),
        }
    }

    /// Current state of `id`, or `None` if it was never reserved.
    pub fn lookup(&self, id: EntryId) -> Option<EntryState> {
        let entries = self.entries.read().expect("registry lock poisoned");
        id.index().and_then(|i| entries.get(i)).cloned()
    }

    /// Number of identifiers reserved so far.
    pub fn len(&self) -> usize {
        self.entries.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn reserve_allocates_from_zero_in_order() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.reserve(), EntryId(0));
        assert_eq!(registry.reserve(), EntryId(1));
        assert_eq!(registry.reserve(), EntryId(2));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        let registry = Registry::new();
        assert_eq!(registry.lookup(EntryId(0)), None);

        let id = registry.reserve();
        assert_eq!(registry.lookup(id.next()), None);
        assert_eq!(registry.lookup(EntryId(u64::MAX)), None);
    }

    #[test]
    fn reserved_entry_is_pending_until_completed() {
        let registry = Registry::new();
        let id = registry.reserve();
        assert_eq!(registry.lookup(id), Some(EntryState::Pending));

        registry.complete(id, "digest".to_string());
        assert_eq!(registry.lookup(id), Some(EntryState::Ready("digest".to_string())));
        // Stays put on every subsequent read.
        for _ in 0..3 {
            assert_eq!(registry.lookup(id), Some(EntryState::Ready("digest".to_string())));
        }
    }

    #[test]
    fn completing_one_entry_leaves_others_pending() {
        let registry = Registry::new();
        let a = registry.reserve();
        let b = registry.reserve();

        registry.complete(b, "b".to_string());
        assert_eq!(registry.lookup(a), Some(EntryState::Pending));
        assert_eq!(registry.lookup(b), Some(EntryState::Ready("b".to_string())));
    }

    #[test]
    fn complete_on_unreserved_id_is_ignored() {
        let registry = Registry::new();
        registry.complete(EntryId(5), "stray".to_string());
        assert!(registry.is_empty());
        assert_eq!(registry.lookup(EntryId(5)), None);
    }

    #[test]
    fn concurrent_reserves_are_distinct_and_contiguous() {
        let registry = Arc::new(Registry::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || (0..250).map(|_| registry.reserve()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in threads {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }

        assert_eq!(seen.len(), 2000);
        assert_eq!(registry.len(), 2000);
        assert!((0..2000).all(|i| seen.contains(&EntryId(i))));
    }

    #[test]
    fn per_thread_ids_increase_in_allocation_order() {
        let registry = Arc::new(Registry::new());
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || (0..100).map(|_| registry.reserve()).collect::<Vec<_>>())
            })
            .collect();

        for handle in threads {
            let ids = handle.join().unwrap();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
