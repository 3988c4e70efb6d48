//! Projection integration tests
//!
//! Tests for the read path end to end: chain resolution through the
//! engine, the external view shapes, and the one-ancestor bound.

use std::sync::Arc;

use revision_ledger::{
    Actor, ChangeEvent, DocumentStore, EventAction, EventPayload, RevisionEngine, RevisionFields,
    SlideFields, TrackFields,
};

fn actor() -> Actor {
    Actor::new("editor@example.com")
}

fn ingest(engine: &RevisionEngine, action: EventAction, payload: EventPayload) {
    engine
        .ingest(ChangeEvent::new(action, payload, actor()))
        .expect("Failed to ingest event");
}

fn seeded_engine() -> RevisionEngine {
    let engine = RevisionEngine::new(Arc::new(DocumentStore::new()));

    let mut revision = RevisionFields::new("rev-1");
    revision.status = Some("draft".to_string());
    revision.major = Some(1);
    revision.minor = Some(0);
    revision.patch = Some(0);
    ingest(&engine, EventAction::Created, EventPayload::Revision(revision));

    let mut slide = SlideFields::new("slide-1", "rev-1");
    slide.position = Some(1);
    ingest(&engine, EventAction::Created, EventPayload::Slide(slide));

    let mut track = TrackFields::new("track-1", "slide-1");
    track.seconds = Some(6.0);
    ingest(&engine, EventAction::Created, EventPayload::Track(track));

    engine
}

#[test]
fn test_revision_view_composes_semantic_version() {
    let engine = seeded_engine();

    let mut bump = RevisionFields::new("rev-1");
    bump.minor = Some(2);
    bump.patch = Some(3);
    ingest(&engine, EventAction::Updated, EventPayload::Revision(bump));

    let view = engine.latest_revision("rev-1").unwrap();
    assert_eq!(view.lesson_revision.version, "1.2.3");
    assert_eq!(view.lesson_revision.status.as_deref(), Some("draft"));
}

#[test]
fn test_revision_view_embeds_slides_without_tracks() {
    let engine = seeded_engine();

    let view = engine.latest_revision("rev-1").unwrap();
    assert_eq!(view.lesson_revision.slides.len(), 1);
    assert_eq!(view.lesson_revision.slides[0].lesson_slide.id, "slide-1");

    let json = serde_json::to_value(&view).unwrap();
    let slide = &json["lessonRevision"]["slides"][0]["lessonSlide"];
    assert_eq!(slide["position"], 1);
    assert!(slide.get("tracks").is_none());
}

#[test]
fn test_slide_view_includes_tracks() {
    let engine = seeded_engine();

    let view = engine.latest_slide("slide-1").unwrap();
    assert_eq!(view.lesson_slide.fields.id, "slide-1");
    assert_eq!(view.lesson_slide.tracks.len(), 1);
    assert_eq!(view.lesson_slide.tracks[0].seconds, Some(6.0));
}

#[test]
fn test_views_strip_internal_bookkeeping() {
    let engine = seeded_engine();

    let json = serde_json::to_value(engine.latest_revision("rev-1").unwrap()).unwrap();
    assert!(json.get("version").is_none()); // snapshot version id
    assert!(json.get("action").is_none());
    assert!(json.get("actor").is_none());
    assert!(json.get("lessonRevision").is_some());
}

#[test]
fn test_ancestor_is_bounded_to_one_level() {
    let engine = seeded_engine();
    for i in 1..=4u32 {
        let mut bump = RevisionFields::new("rev-1");
        bump.patch = Some(i);
        ingest(&engine, EventAction::Updated, EventPayload::Revision(bump));
    }

    // Seven versions exist, but the view carries exactly one ancestor
    assert!(engine.store().revision_snapshots().version_count("rev-1") > 2);
    let view = engine.latest_revision("rev-1").unwrap();
    let ancestor = view.previous.as_deref().expect("One ancestor expected");
    assert!(ancestor.previous.is_none());

    // The ancestor is the directly superseded state, in the same shape
    assert_eq!(view.lesson_revision.version, "1.0.4");
    assert_eq!(ancestor.lesson_revision.version, "1.0.3");
}

#[test]
fn test_first_version_has_no_ancestor() {
    let engine = RevisionEngine::new(Arc::new(DocumentStore::new()));
    ingest(
        &engine,
        EventAction::Created,
        EventPayload::Revision(RevisionFields::new("rev-1")),
    );

    let view = engine.latest_revision("rev-1").unwrap();
    assert!(view.previous.is_none());
    assert_eq!(view.lesson_revision.version, "0.0.0");
}

#[test]
fn test_projection_is_stable_across_reads() {
    let engine = seeded_engine();

    let first = engine.latest_revision("rev-1").unwrap();
    let second = engine.latest_revision("rev-1").unwrap();
    assert_eq!(first, second);

    let first = engine.latest_slide("slide-1").unwrap();
    let second = engine.latest_slide("slide-1").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_ids_read_as_none() {
    let engine = seeded_engine();

    assert!(engine.latest_revision("rev-9").is_none());
    assert!(engine.latest_slide("slide-9").is_none());
    assert!(engine.revision_history("rev-9", 3).is_empty());
}
