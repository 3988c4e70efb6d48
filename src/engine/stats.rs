//! Fold statistics
//!
//! Counters for everything the engine accepts or declines to fold. The
//! accepted-but-not-folded paths (unrecognized actions, tracks whose slide
//! is missing from the revision snapshot) are counted here and reported by
//! the engine rather than passing silently.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::EntityKind;

/// Point-in-time copy of the engine's counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldStatsSnapshot {
    /// Events appended across all audit logs
    #[serde(rename = "eventsRecorded")]
    pub events_recorded: u64,
    /// Events appended, by entity kind
    #[serde(rename = "eventsByKind", default)]
    pub events_by_kind: HashMap<EntityKind, u64>,
    /// Revision snapshot versions published
    #[serde(rename = "revisionVersions")]
    pub revision_versions: u64,
    /// Slide snapshot versions published
    #[serde(rename = "slideVersions")]
    pub slide_versions: u64,
    /// Events accepted with an unrecognized action; no fold performed
    #[serde(rename = "unknownActionNoops")]
    pub unknown_action_noops: u64,
    /// Track folds whose slide was missing from the revision snapshot
    #[serde(rename = "orphanTrackNoops")]
    pub orphan_track_noops: u64,
    /// Folds re-run after an optimistic version check failed
    #[serde(rename = "conflictsRetried")]
    pub conflicts_retried: u64,
}

/// Thread-safe counters owned by the engine
pub struct FoldStats {
    inner: Mutex<FoldStatsSnapshot>,
}

impl FoldStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FoldStatsSnapshot::default()),
        }
    }

    pub(crate) fn record_event(&self, kind: EntityKind) {
        let mut inner = self.inner.lock();
        inner.events_recorded += 1;
        *inner.events_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub(crate) fn record_revision_version(&self) {
        self.inner.lock().revision_versions += 1;
    }

    pub(crate) fn record_slide_version(&self) {
        self.inner.lock().slide_versions += 1;
    }

    pub(crate) fn record_unknown_action(&self) {
        self.inner.lock().unknown_action_noops += 1;
    }

    pub(crate) fn record_orphan_track(&self) {
        self.inner.lock().orphan_track_noops += 1;
    }

    pub(crate) fn record_conflict_retry(&self) {
        self.inner.lock().conflicts_retried += 1;
    }

    /// Copy out the current counter values
    pub fn snapshot(&self) -> FoldStatsSnapshot {
        self.inner.lock().clone()
    }
}

impl Default for FoldStats {
    fn default() -> Self {
        Self::new()
    }
}
