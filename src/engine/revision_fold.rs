//! Revision-level snapshot builder
//!
//! Folds every event into the owning revision's snapshot chain: revision
//! events merge into the snapshot's own fields, slide events fold into the
//! embedded slide collection, and track events fold into the embedded
//! tracks of their owning slide. Every accepted event produces exactly one
//! new revision version.

use crate::store::DocumentStore;
use crate::types::{
    EngineError, EngineResult, EventAction, EventPayload, RevisionFields, RevisionSnapshot,
    SlideEntry, SlideFields, VersionId,
};

use super::merge;
use super::slide_fold::{fold_tracks, resolve_slide_state};

/// Result of one revision-level fold
#[derive(Debug)]
pub(crate) struct RevisionFoldOutcome {
    pub snapshot: RevisionSnapshot,
    /// A track event whose slide is not embedded in the revision snapshot
    /// still touches the revision, but its collection fold did nothing
    pub orphan_track: bool,
}

/// Fold a slide event into the embedded slide collection
///
/// Created slides are appended (idempotent when the id is already present),
/// updated slides merge into the existing entry, deleted slides are removed
/// by domain id. Unrecognized actions fold as no-ops.
pub(crate) fn fold_slides(
    slides: &mut Vec<SlideEntry>,
    action: &EventAction,
    incoming: &SlideFields,
) {
    match action {
        EventAction::Created => {
            if !slides.iter().any(|entry| entry.fields.id == incoming.id) {
                slides.push(SlideEntry::new(incoming.clone()));
            }
        }
        EventAction::Updated => {
            if let Some(entry) = slides.iter_mut().find(|entry| entry.fields.id == incoming.id) {
                merge::merge_slide(&mut entry.fields, incoming);
            }
        }
        EventAction::Deleted => {
            slides.retain(|entry| entry.fields.id != incoming.id);
        }
        EventAction::Other(_) => {}
    }
}

/// One resolve-fold-persist attempt at revision level
///
/// The caller retries on [`EngineError::WriteConflict`].
pub(crate) fn fold_event(
    store: &DocumentStore,
    action: &EventAction,
    payload: &EventPayload,
) -> EngineResult<RevisionFoldOutcome> {
    // Resolve the revision id this event rolls up to
    let revision_id = match payload {
        EventPayload::Revision(fields) => fields.id.clone(),
        EventPayload::Slide(fields) => fields.revision_id.clone(),
        EventPayload::Track(fields) => resolve_slide_state(store, &fields.slide_id)
            .map(|(revision_id, _)| revision_id)
            .ok_or_else(|| EngineError::ParentNotFound {
                kind: payload.entity_kind(),
                domain_id: fields.id.clone(),
                parent_id: fields.slide_id.clone(),
            })?,
    };

    let previous = store.revision_snapshots().latest(&revision_id);

    let mut candidate = match &previous {
        Some(prev) => RevisionSnapshot {
            version: VersionId(0),
            domain_id: prev.domain_id.clone(),
            action: EventAction::Updated,
            fields: prev.fields.clone(),
            slides: prev.slides.clone(),
            previous: Some(prev.version),
            created_at: 0,
        },
        None => {
            // Only the revision's own first event may start the chain;
            // child events against an unknown revision are fatal
            if !matches!(payload, EventPayload::Revision(_)) {
                return Err(EngineError::ParentNotFound {
                    kind: payload.entity_kind(),
                    domain_id: payload.domain_id().to_string(),
                    parent_id: revision_id,
                });
            }
            RevisionSnapshot {
                version: VersionId(0),
                domain_id: revision_id.clone(),
                action: EventAction::Created,
                fields: RevisionFields::new(revision_id.clone()),
                slides: Vec::new(),
                previous: None,
                created_at: 0,
            }
        }
    };

    let mut orphan_track = false;
    match payload {
        EventPayload::Revision(fields) => match action {
            EventAction::Created | EventAction::Updated => {
                merge::merge_revision(&mut candidate.fields, fields);
            }
            EventAction::Deleted => {
                if previous.is_some() {
                    candidate.action = EventAction::Deleted;
                }
            }
            EventAction::Other(_) => {}
        },
        EventPayload::Slide(fields) => fold_slides(&mut candidate.slides, action, fields),
        EventPayload::Track(fields) => match candidate.find_slide_mut(&fields.slide_id) {
            Some(entry) => fold_tracks(&mut entry.tracks, action, fields),
            None => orphan_track = true,
        },
    }

    let snapshot = store
        .revision_snapshots()
        .insert_after(previous.map(|prev| prev.version), candidate)?;

    Ok(RevisionFoldOutcome {
        snapshot,
        orphan_track,
    })
}
