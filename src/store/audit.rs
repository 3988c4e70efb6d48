//! Append-only audit logs
//!
//! One log per entity kind. A log accepts any structurally valid event for
//! its kind, assigns a record id and insertion timestamp, and never mutates
//! or deletes what it recorded. There is no deduplication and no ordering
//! guarantee beyond insertion time.

use parking_lot::RwLock;

use crate::types::{AuditRecord, ChangeEvent, EngineError, EngineResult, EntityKind};
use crate::utils::current_timestamp_millis;
use crate::validation::validate_event;

struct LogInner {
    records: Vec<AuditRecord>,
    next_id: u64,
}

/// Append-only record of every event received for one entity kind
pub struct AuditLog {
    kind: EntityKind,
    inner: RwLock<LogInner>,
}

impl AuditLog {
    /// Create an empty log for one entity kind
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            inner: RwLock::new(LogInner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Entity kind this log records
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Append an event, assigning a record id and insertion timestamp
    ///
    /// Fails with [`EngineError::MalformedEvent`] if the event is missing
    /// its domain id or parent reference, or targets the wrong log; a
    /// rejected event leaves the log untouched.
    pub fn append(&self, event: ChangeEvent) -> EngineResult<AuditRecord> {
        validate_event(&event)?;
        if event.entity_kind() != self.kind {
            return Err(EngineError::MalformedEvent(format!(
                "{} log cannot accept a {} event",
                self.kind,
                event.entity_kind()
            )));
        }

        let mut inner = self.inner.write();
        let record = AuditRecord {
            record_id: inner.next_id,
            recorded_at: current_timestamp_millis(),
            event,
        };
        inner.next_id += 1;
        inner.records.push(record.clone());
        Ok(record)
    }

    /// Number of records in the log
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// All records, in insertion order
    pub fn records(&self) -> Vec<AuditRecord> {
        self.inner.read().records.clone()
    }

    /// Records for one domain id, in insertion order
    pub fn records_for(&self, domain_id: &str) -> Vec<AuditRecord> {
        self.inner
            .read()
            .records
            .iter()
            .filter(|record| record.event.domain_id() == domain_id)
            .cloned()
            .collect()
    }
}
