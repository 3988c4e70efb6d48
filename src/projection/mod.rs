//! Projection of internal snapshots into external view documents
//!
//! Projections are pure functions of their inputs: the same snapshot always
//! yields the same view. Internal bookkeeping (version ids, fold actions,
//! actor metadata) is stripped, and the optional ancestor is rendered in
//! the same external shape as the head: consumers see one document shape
//! per entity kind.

use crate::types::{
    LessonRevision, LessonSlide, RevisionSnapshot, RevisionView, SlideInRevision, SlideSnapshot,
    SlideView,
};

/// Project a revision snapshot, optionally with its one-level ancestor
///
/// The semantic version string is composed from the revision's three
/// numeric components. Slides are rendered without their tracks at this
/// level; the top-level slide projection is where tracks appear.
pub fn project_revision(
    snapshot: &RevisionSnapshot,
    ancestor: Option<&RevisionSnapshot>,
) -> RevisionView {
    RevisionView {
        created_at: snapshot.created_at,
        lesson_revision: LessonRevision {
            version: snapshot.fields.semantic_version(),
            status: snapshot.fields.status.clone(),
            title: snapshot.fields.title.clone(),
            id: snapshot.domain_id.clone(),
            created_at: snapshot.created_at,
            slides: snapshot
                .slides
                .iter()
                .map(|entry| SlideInRevision {
                    lesson_slide: entry.fields.clone(),
                })
                .collect(),
        },
        previous: ancestor.map(|prior| Box::new(project_revision(prior, None))),
    }
}

/// Project a slide snapshot, optionally with its one-level ancestor
pub fn project_slide(snapshot: &SlideSnapshot, ancestor: Option<&SlideSnapshot>) -> SlideView {
    SlideView {
        created_at: snapshot.created_at,
        lesson_slide: LessonSlide {
            fields: snapshot.fields.clone(),
            tracks: snapshot.tracks.clone(),
        },
        previous: ancestor.map(|prior| Box::new(project_slide(prior, None))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        EventAction, RevisionFields, SlideEntry, SlideFields, TrackFields, VersionId,
    };

    fn revision_snapshot() -> RevisionSnapshot {
        let mut fields = RevisionFields::new("rev-1");
        fields.status = Some("draft".to_string());
        fields.major = Some(1);
        fields.minor = Some(2);

        let mut entry = SlideEntry::new(SlideFields::new("slide-1", "rev-1"));
        entry.tracks.push(TrackFields::new("track-1", "slide-1"));

        RevisionSnapshot {
            version: VersionId(4),
            domain_id: "rev-1".to_string(),
            action: EventAction::Updated,
            fields,
            slides: vec![entry],
            previous: Some(VersionId(3)),
            created_at: 99,
        }
    }

    #[test]
    fn test_revision_projection_shape() {
        let view = project_revision(&revision_snapshot(), None);

        assert_eq!(view.lesson_revision.version, "1.2.0");
        assert_eq!(view.lesson_revision.id, "rev-1");
        assert_eq!(view.lesson_revision.status.as_deref(), Some("draft"));
        assert_eq!(view.created_at, 99);
        assert_eq!(view.lesson_revision.slides.len(), 1);
        assert!(view.previous.is_none());
    }

    #[test]
    fn test_revision_projection_strips_internal_fields() {
        let json = serde_json::to_value(project_revision(&revision_snapshot(), None)).unwrap();

        assert!(json.get("version").is_none());
        assert!(json.get("action").is_none());
        assert!(json.get("actor").is_none());
        // Embedded slides carry no tracks in the revision-rooted view
        assert!(json["lessonRevision"]["slides"][0]["lessonSlide"]
            .get("tracks")
            .is_none());
    }

    #[test]
    fn test_ancestor_rendered_in_same_shape_one_level() {
        let head = revision_snapshot();
        let mut older = revision_snapshot();
        older.fields.minor = Some(1);

        let view = project_revision(&head, Some(&older));
        let ancestor = view.previous.expect("ancestor should be present");
        assert_eq!(ancestor.lesson_revision.version, "1.1.0");
        // One level only, even though the chain is longer
        assert!(ancestor.previous.is_none());
    }

    #[test]
    fn test_projection_is_pure() {
        let snapshot = revision_snapshot();
        let older = revision_snapshot();

        assert_eq!(
            project_revision(&snapshot, Some(&older)),
            project_revision(&snapshot, Some(&older))
        );
    }

    #[test]
    fn test_slide_projection_includes_tracks() {
        let mut track = TrackFields::new("track-1", "slide-1");
        track.seconds = Some(6.0);
        let snapshot = SlideSnapshot {
            version: VersionId(2),
            domain_id: "slide-1".to_string(),
            action: EventAction::Updated,
            fields: SlideFields::new("slide-1", "rev-1"),
            tracks: vec![track],
            previous: Some(VersionId(1)),
            created_at: 55,
        };

        let view = project_slide(&snapshot, None);
        assert_eq!(view.lesson_slide.tracks.len(), 1);
        assert_eq!(view.lesson_slide.tracks[0].seconds, Some(6.0));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["lessonSlide"]["id"], "slide-1");
        assert_eq!(json["lessonSlide"]["tracks"][0]["id"], "track-1");
    }
}
