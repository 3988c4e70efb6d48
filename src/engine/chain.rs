//! Version chain traversal
//!
//! The chain per domain id is the sequence of `previous` references between
//! immutable versions. Resolution is a bounded series of single index
//! lookups, never a full walk; output size is independent of how long an
//! entity's history is.

use crate::store::{VersionStore, VersionedDoc};

/// Read-side view over one snapshot store's version chains
pub struct VersionChain<'a, T> {
    store: &'a VersionStore<T>,
}

impl<'a, T: VersionedDoc> VersionChain<'a, T> {
    /// Create a chain view over a snapshot store
    pub fn new(store: &'a VersionStore<T>) -> Self {
        Self { store }
    }

    /// Resolve the latest version plus up to `depth` ancestors
    ///
    /// Returns `None` when the domain id has no versions. The result is
    /// ordered head first; it is shorter than `depth + 1` when the chain
    /// terminates early at a version with no `previous`.
    pub fn resolve(&self, domain_id: &str, depth: usize) -> Option<Vec<T>> {
        let head = self.store.latest(domain_id)?;
        let mut chain = vec![head];

        while chain.len() <= depth {
            let next = match chain.last().and_then(|doc| doc.previous()) {
                Some(version) => version,
                None => break,
            };
            match self.store.get(next) {
                Some(ancestor) => chain.push(ancestor),
                None => break,
            }
        }

        Some(chain)
    }

    /// The default read contract: head plus exactly one ancestor level
    pub fn latest_with_ancestor(&self, domain_id: &str) -> Option<(T, Option<T>)> {
        let mut chain = self.resolve(domain_id, 1)?;
        let head = chain.remove(0);
        let ancestor = chain.pop();
        Some((head, ancestor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventAction, SlideFields, SlideSnapshot, VersionId};

    fn seed_chain(store: &VersionStore<SlideSnapshot>, versions: usize) -> Vec<VersionId> {
        let mut ids = Vec::new();
        let mut previous = None;
        for _ in 0..versions {
            let snapshot = store
                .insert_after(
                    previous,
                    SlideSnapshot {
                        version: VersionId(0),
                        domain_id: "slide-1".to_string(),
                        action: EventAction::Updated,
                        fields: SlideFields::new("slide-1", "rev-1"),
                        tracks: Vec::new(),
                        previous,
                        created_at: 0,
                    },
                )
                .expect("Failed to seed chain version");
            previous = Some(snapshot.version);
            ids.push(snapshot.version);
        }
        ids
    }

    #[test]
    fn test_resolve_depth_zero_returns_only_head() {
        let store = VersionStore::new();
        let ids = seed_chain(&store, 3);

        let chain = VersionChain::new(&store).resolve("slide-1", 0).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].version, ids[2]);
    }

    #[test]
    fn test_resolve_bounds_ancestors_to_depth() {
        let store = VersionStore::new();
        let ids = seed_chain(&store, 5);

        let chain = VersionChain::new(&store).resolve("slide-1", 2).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].version, ids[4]);
        assert_eq!(chain[1].version, ids[3]);
        assert_eq!(chain[2].version, ids[2]);
    }

    #[test]
    fn test_resolve_stops_at_chain_origin() {
        let store = VersionStore::new();
        seed_chain(&store, 2);

        let chain = VersionChain::new(&store).resolve("slide-1", 10).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.last().unwrap().previous, None);
    }

    #[test]
    fn test_latest_with_ancestor() {
        let store = VersionStore::new();
        let ids = seed_chain(&store, 2);

        let (head, ancestor) = VersionChain::new(&store)
            .latest_with_ancestor("slide-1")
            .unwrap();
        assert_eq!(head.version, ids[1]);
        assert_eq!(ancestor.unwrap().version, ids[0]);

        assert!(VersionChain::new(&store)
            .latest_with_ancestor("slide-9")
            .is_none());
    }
}
