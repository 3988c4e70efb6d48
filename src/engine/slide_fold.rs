//! Slide-level snapshot builder
//!
//! Folds one track event into the previous slide snapshot, producing the
//! next immutable version. Track events are the only producer of
//! slide-level versions; the first version for a slide takes its baseline
//! from the slide's embedded state in the latest revision snapshot, and a
//! fold never proceeds from a missing parent.

use crate::store::DocumentStore;
use crate::types::{
    EngineError, EngineResult, EntityKind, EventAction, SlideEntry, SlideSnapshot, TrackFields,
    VersionId,
};

use super::merge;

/// Fold a track event into the track collection
///
/// Created tracks are appended (idempotent when the id is already present),
/// updated tracks merge into the existing entry, deleted tracks are removed
/// by domain id. Unrecognized actions fold as no-ops.
pub(crate) fn fold_tracks(
    tracks: &mut Vec<TrackFields>,
    action: &EventAction,
    incoming: &TrackFields,
) {
    match action {
        EventAction::Created => {
            if !tracks.iter().any(|track| track.id == incoming.id) {
                tracks.push(incoming.clone());
            }
        }
        EventAction::Updated => {
            if let Some(existing) = tracks.iter_mut().find(|track| track.id == incoming.id) {
                merge::merge_track(existing, incoming);
            }
        }
        EventAction::Deleted => {
            tracks.retain(|track| track.id != incoming.id);
        }
        EventAction::Other(_) => {}
    }
}

/// Resolve a slide's current state and owning revision id
///
/// Prefers the slide-level snapshot chain; falls back to the slide's
/// embedded entry in the latest revision snapshots when the slide-level
/// chain has not started yet.
pub(crate) fn resolve_slide_state(
    store: &DocumentStore,
    slide_id: &str,
) -> Option<(String, SlideEntry)> {
    if let Some(snapshot) = store.slide_snapshots().latest(slide_id) {
        let revision_id = snapshot.fields.revision_id.clone();
        return Some((
            revision_id,
            SlideEntry {
                fields: snapshot.fields,
                tracks: snapshot.tracks,
            },
        ));
    }

    for revision in store.revision_snapshots().latest_by_domain() {
        if let Some(entry) = revision.find_slide(slide_id) {
            return Some((revision.domain_id.clone(), entry.clone()));
        }
    }

    None
}

/// One resolve-fold-persist attempt for a track event at slide level
///
/// The caller retries on [`EngineError::WriteConflict`].
pub(crate) fn fold_track_event(
    store: &DocumentStore,
    action: &EventAction,
    track: &TrackFields,
) -> EngineResult<SlideSnapshot> {
    let previous = store.slide_snapshots().latest(&track.slide_id);

    let mut candidate = match &previous {
        Some(prev) => SlideSnapshot {
            version: VersionId(0),
            domain_id: prev.domain_id.clone(),
            action: EventAction::Updated,
            fields: prev.fields.clone(),
            tracks: prev.tracks.clone(),
            previous: Some(prev.version),
            created_at: 0,
        },
        None => {
            let (_, entry) = resolve_slide_state(store, &track.slide_id).ok_or_else(|| {
                EngineError::ParentNotFound {
                    kind: EntityKind::Track,
                    domain_id: track.id.clone(),
                    parent_id: track.slide_id.clone(),
                }
            })?;
            SlideSnapshot {
                version: VersionId(0),
                domain_id: track.slide_id.clone(),
                action: EventAction::Created,
                fields: entry.fields,
                tracks: entry.tracks,
                previous: None,
                created_at: 0,
            }
        }
    };

    fold_tracks(&mut candidate.tracks, action, track);

    store
        .slide_snapshots()
        .insert_after(previous.map(|prev| prev.version), candidate)
}
