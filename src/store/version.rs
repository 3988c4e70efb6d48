//! Snapshot version arena
//!
//! The arena holds every snapshot version ever persisted, indexed by the
//! store-assigned version id. Versions are immutable once inserted; the
//! chain per domain id exists only through each version's `previous`
//! reference, and chain traversal is a sequence of index lookups.
//!
//! `insert_after` is the publish operation: it compares the caller's
//! expected latest version against the store's actual latest under the
//! write lock, which turns the lost-update hazard of resolve-then-append
//! into an explicit `WriteConflict` the engine can retry.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::types::{EngineError, EngineResult, RevisionSnapshot, SlideSnapshot, VersionId};
use crate::utils::current_timestamp_millis;

/// Behavior a snapshot type needs for arena storage
pub trait VersionedDoc: Clone {
    /// Externally-assigned domain id this version belongs to
    fn domain_id(&self) -> &str;
    /// Store-assigned version id
    fn version(&self) -> VersionId;
    /// Store-assigned insertion timestamp
    fn created_at(&self) -> u64;
    /// Link to the superseded version
    fn previous(&self) -> Option<VersionId>;
    /// Stamp the store-assigned id and timestamp at insert time
    fn stamp(&mut self, version: VersionId, created_at: u64);
}

impl VersionedDoc for RevisionSnapshot {
    fn domain_id(&self) -> &str {
        &self.domain_id
    }

    fn version(&self) -> VersionId {
        self.version
    }

    fn created_at(&self) -> u64 {
        self.created_at
    }

    fn previous(&self) -> Option<VersionId> {
        self.previous
    }

    fn stamp(&mut self, version: VersionId, created_at: u64) {
        self.version = version;
        self.created_at = created_at;
    }
}

impl VersionedDoc for SlideSnapshot {
    fn domain_id(&self) -> &str {
        &self.domain_id
    }

    fn version(&self) -> VersionId {
        self.version
    }

    fn created_at(&self) -> u64 {
        self.created_at
    }

    fn previous(&self) -> Option<VersionId> {
        self.previous
    }

    fn stamp(&mut self, version: VersionId, created_at: u64) {
        self.version = version;
        self.created_at = created_at;
    }
}

struct Arena<T> {
    docs: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: VersionedDoc> Arena<T> {
    /// Latest version id for a domain id: greatest `createdAt`, ties broken
    /// by insertion order (the version id)
    fn latest_version(&self, domain_id: &str) -> Option<VersionId> {
        let mut best: Option<(u64, VersionId)> = None;
        for doc in self.docs.values() {
            if doc.domain_id() != domain_id {
                continue;
            }
            let key = (doc.created_at(), doc.version());
            if best.map_or(true, |current| key > current) {
                best = Some(key);
            }
        }
        best.map(|(_, version)| version)
    }
}

/// Arena-backed store for one snapshot collection
pub struct VersionStore<T> {
    inner: RwLock<Arena<T>>,
}

impl<T: VersionedDoc> VersionStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arena {
                docs: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of versions across all domain ids
    pub fn len(&self) -> usize {
        self.inner.read().docs.len()
    }

    /// Whether the store holds no versions
    pub fn is_empty(&self) -> bool {
        self.inner.read().docs.is_empty()
    }

    /// Number of versions for one domain id
    pub fn version_count(&self, domain_id: &str) -> usize {
        self.inner
            .read()
            .docs
            .values()
            .filter(|doc| doc.domain_id() == domain_id)
            .count()
    }

    /// Index lookup by version id
    pub fn get(&self, version: VersionId) -> Option<T> {
        self.inner.read().docs.get(&version.0).cloned()
    }

    /// Resolve the latest version for a domain id
    ///
    /// Greatest `createdAt` wins; ties are broken by the store-assigned
    /// version id, so insertion order is authoritative.
    pub fn latest(&self, domain_id: &str) -> Option<T> {
        let arena = self.inner.read();
        let version = arena.latest_version(domain_id)?;
        arena.docs.get(&version.0).cloned()
    }

    /// Latest version of every domain id in the store
    pub fn latest_by_domain(&self) -> Vec<T> {
        let arena = self.inner.read();
        let mut best: HashMap<&str, &T> = HashMap::new();
        for doc in arena.docs.values() {
            let entry = best.entry(doc.domain_id()).or_insert(doc);
            let key = (doc.created_at(), doc.version());
            if key > ((*entry).created_at(), (*entry).version()) {
                *entry = doc;
            }
        }
        best.into_values().cloned().collect()
    }

    /// Publish a new version, checking the optimistic precondition
    ///
    /// `expected` is the latest version id the caller resolved before
    /// folding (`None` for a first-ever version). If another writer
    /// published in the meantime the insert is rejected with
    /// [`EngineError::WriteConflict`] and nothing is stored; on success the
    /// stamped version is returned.
    pub fn insert_after(&self, expected: Option<VersionId>, mut doc: T) -> EngineResult<T> {
        let mut arena = self.inner.write();
        let current = arena.latest_version(doc.domain_id());
        if current != expected {
            return Err(EngineError::WriteConflict {
                domain_id: doc.domain_id().to_string(),
            });
        }

        let version = VersionId(arena.next_id);
        arena.next_id += 1;
        doc.stamp(version, current_timestamp_millis());
        arena.docs.insert(version.0, doc.clone());
        Ok(doc)
    }
}

impl<T: VersionedDoc> Default for VersionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
