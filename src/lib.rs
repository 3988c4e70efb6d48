//! Revision Ledger
//!
//! A versioned denormalization engine for a three-level content hierarchy
//! (Revision → Slide → Track): every change event lands in an append-only
//! audit log and folds into a chain of immutable, fully-denormalized
//! snapshots, so a reader fetches one document and sees the whole current
//! state plus one level of prior state.
//!
//! # Features
//!
//! - **Append-only audit logs**: one per entity kind, records never change
//! - **Snapshot chains**: every fold publishes a new immutable version
//!   linked to the superseded one
//! - **Lost-update safe**: versions publish through an optimistic check,
//!   with bounded retry on conflict
//! - **Bounded reads**: the read path resolves exactly one ancestor level
//! - **Stable projections**: external views strip internal bookkeeping
//!
//! # Modules
//!
//! - `types`: events, audit records, snapshots, views, errors
//! - `store`: audit logs, the snapshot version arena, the store handle
//! - `engine`: snapshot builders, version chains, fold statistics
//! - `projection`: external view construction
//! - `validation`: structural event checks
//! - `utils`: timestamp helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use revision_ledger::{
//!     Actor, ChangeEvent, DocumentStore, EventAction, EventPayload, RevisionEngine,
//!     RevisionFields, SlideFields,
//! };
//!
//! let store = Arc::new(DocumentStore::new());
//! let engine = RevisionEngine::new(store);
//!
//! let mut revision = RevisionFields::new("rev-1");
//! revision.status = Some("draft".to_string());
//! engine
//!     .ingest(ChangeEvent::new(
//!         EventAction::Created,
//!         EventPayload::Revision(revision),
//!         Actor::new("editor@example.com"),
//!     ))
//!     .unwrap();
//! engine
//!     .ingest(ChangeEvent::new(
//!         EventAction::Created,
//!         EventPayload::Slide(SlideFields::new("slide-1", "rev-1")),
//!         Actor::new("editor@example.com"),
//!     ))
//!     .unwrap();
//!
//! let view = engine.latest_revision("rev-1").unwrap();
//! assert_eq!(view.lesson_revision.id, "rev-1");
//! assert_eq!(view.lesson_revision.slides.len(), 1);
//! ```

pub mod engine;
pub mod projection;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use engine::{
    EngineConfig, FoldStats, FoldStatsSnapshot, IngestReceipt, RevisionEngine, VersionChain,
};
pub use projection::{project_revision, project_slide};
pub use store::{AuditLog, DocumentStore, VersionStore, VersionedDoc};
pub use types::{
    Actor, AuditRecord, ChangeEvent, EngineError, EngineResult, EntityKind, EventAction,
    EventPayload, LessonRevision, LessonSlide, RevisionFields, RevisionSnapshot, RevisionView,
    SlideEntry, SlideFields, SlideInRevision, SlideLayout, SlideSnapshot, SlideView, TrackFields,
    VersionId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
