//! Data types for the revision ledger
//!
//! This module contains the core data structures used throughout the crate:
//! change events and audit records, materialized snapshots, the external
//! view shapes, and the engine error type.

mod error;
mod event;
mod snapshot;
mod view;

pub use error::{EngineError, EngineResult};
pub use event::{
    Actor, AuditRecord, ChangeEvent, EntityKind, EventAction, EventPayload, RevisionFields,
    SlideFields, SlideLayout, TrackFields,
};
pub use snapshot::{RevisionSnapshot, SlideEntry, SlideSnapshot, VersionId};
pub use view::{LessonRevision, LessonSlide, RevisionView, SlideInRevision, SlideView};
