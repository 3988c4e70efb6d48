//! Revision engine: event ingestion and the read path
//!
//! One event is fully processed per `ingest` call: structural validation,
//! audit log append, then routing to the snapshot builders. A track event
//! updates the slide-level builder and, flattened through its owning slide,
//! the revision-level builder; a slide event updates only the revision
//! builder; a revision event folds into its own chain.
//!
//! Each builder attempt publishes through the store's optimistic version
//! check; a concurrent writer on the same domain id turns into a
//! `WriteConflict`, and the engine re-runs the resolve-fold-persist cycle
//! up to the configured retry budget before surfacing the error.

mod chain;
mod merge;
mod revision_fold;
mod slide_fold;
mod stats;

pub use chain::VersionChain;
pub use stats::{FoldStats, FoldStatsSnapshot};

use std::sync::Arc;

use crate::projection;
use crate::store::DocumentStore;
use crate::types::{
    AuditRecord, ChangeEvent, EngineError, EngineResult, EventAction, EventPayload,
    RevisionSnapshot, RevisionView, SlideSnapshot, SlideView, TrackFields, VersionId,
};

use revision_fold::RevisionFoldOutcome;

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many times a fold is re-run after a write conflict before the
    /// conflict surfaces to the caller
    pub max_fold_retries: usize,
    /// Ancestor levels resolved by the default read path
    pub history_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_fold_retries: 3,
            history_depth: 1,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

/// What one accepted event produced
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    /// The audit record the event was stored as
    pub record: AuditRecord,
    /// New revision-level version, when a fold ran
    pub revision_version: Option<VersionId>,
    /// New slide-level version, for track events
    pub slide_version: Option<VersionId>,
    /// False when the event was recorded but not folded (unrecognized
    /// action)
    pub folded: bool,
}

/// The denormalization engine
///
/// Owns nothing but its configuration and counters; all state lives in the
/// [`DocumentStore`] handle passed in at construction.
pub struct RevisionEngine {
    config: EngineConfig,
    store: Arc<DocumentStore>,
    stats: FoldStats,
}

impl RevisionEngine {
    /// Create an engine over a store handle with the default configuration
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(store: Arc<DocumentStore>, config: EngineConfig) -> Self {
        Self {
            config,
            store,
            stats: FoldStats::new(),
        }
    }

    /// The underlying document store
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current counter values
    pub fn stats(&self) -> FoldStatsSnapshot {
        self.stats.snapshot()
    }

    /// Record one event and fold it into the affected snapshot chains
    ///
    /// The event is appended to its kind's audit log first; the snapshot
    /// builders then each publish exactly one new version. Events with an
    /// unrecognized action are recorded but not folded, and the skipped
    /// fold is counted and reported.
    pub fn ingest(&self, event: ChangeEvent) -> EngineResult<IngestReceipt> {
        let kind = event.entity_kind();
        let record = self.store.log_for(kind).append(event)?;
        self.stats.record_event(kind);

        if !record.event.action.is_recognized() {
            self.stats.record_unknown_action();
            eprintln!(
                "Warning: event action '{}' for {} '{}' is not recognized; no fold performed",
                record.event.action,
                kind,
                record.event.domain_id()
            );
            return Ok(IngestReceipt {
                record,
                revision_version: None,
                slide_version: None,
                folded: false,
            });
        }

        let mut slide_version = None;
        if let EventPayload::Track(track) = &record.event.payload {
            let snapshot = self.fold_slide_with_retry(&record.event.action, track)?;
            self.stats.record_slide_version();
            slide_version = Some(snapshot.version);
        }

        let outcome = self.fold_revision_with_retry(&record.event.action, &record.event.payload)?;
        self.stats.record_revision_version();
        if outcome.orphan_track {
            self.stats.record_orphan_track();
            eprintln!(
                "Warning: slide '{}' is not embedded in revision '{}'; track '{}' touched the revision without a collection fold",
                record.event.payload.parent_id().unwrap_or("?"),
                outcome.snapshot.domain_id,
                record.event.domain_id()
            );
        }

        Ok(IngestReceipt {
            record,
            revision_version: Some(outcome.snapshot.version),
            slide_version,
            folded: true,
        })
    }

    fn fold_slide_with_retry(
        &self,
        action: &EventAction,
        track: &TrackFields,
    ) -> EngineResult<SlideSnapshot> {
        let mut attempts = 0;
        loop {
            match slide_fold::fold_track_event(&self.store, action, track) {
                Err(EngineError::WriteConflict { .. })
                    if attempts < self.config.max_fold_retries =>
                {
                    attempts += 1;
                    self.stats.record_conflict_retry();
                }
                result => return result,
            }
        }
    }

    fn fold_revision_with_retry(
        &self,
        action: &EventAction,
        payload: &EventPayload,
    ) -> EngineResult<RevisionFoldOutcome> {
        let mut attempts = 0;
        loop {
            match revision_fold::fold_event(&self.store, action, payload) {
                Err(EngineError::WriteConflict { .. })
                    if attempts < self.config.max_fold_retries =>
                {
                    attempts += 1;
                    self.stats.record_conflict_retry();
                }
                result => return result,
            }
        }
    }

    /// Latest revision state as an external view document
    ///
    /// Resolves the configured ancestor depth (one level by default) and
    /// projects the result; deeper history stays in the store.
    pub fn latest_revision(&self, revision_id: &str) -> Option<RevisionView> {
        let chain = VersionChain::new(self.store.revision_snapshots());
        let versions = chain.resolve(revision_id, self.config.history_depth)?;
        versions
            .first()
            .map(|head| projection::project_revision(head, versions.get(1)))
    }

    /// Latest slide state as an external view document
    pub fn latest_slide(&self, slide_id: &str) -> Option<SlideView> {
        let chain = VersionChain::new(self.store.slide_snapshots());
        let versions = chain.resolve(slide_id, self.config.history_depth)?;
        versions
            .first()
            .map(|head| projection::project_slide(head, versions.get(1)))
    }

    /// Raw revision chain, head first, up to `depth` ancestors
    pub fn revision_history(&self, revision_id: &str, depth: usize) -> Vec<RevisionSnapshot> {
        VersionChain::new(self.store.revision_snapshots())
            .resolve(revision_id, depth)
            .unwrap_or_default()
    }

    /// Raw slide chain, head first, up to `depth` ancestors
    pub fn slide_history(&self, slide_id: &str, depth: usize) -> Vec<SlideSnapshot> {
        VersionChain::new(self.store.slide_snapshots())
            .resolve(slide_id, depth)
            .unwrap_or_default()
    }
}
