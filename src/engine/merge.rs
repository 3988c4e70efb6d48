//! Field-enumerated merge rules
//!
//! Update events carry partial payloads; these functions fold them into the
//! existing state with a fixed precedence: an incoming `Some` field always
//! wins, the nested layout object merges recursively, and arrays are
//! replaced wholesale rather than merged element-wise.

use crate::types::{RevisionFields, SlideFields, SlideLayout, TrackFields};

/// Merge incoming revision fields into the existing state
pub(crate) fn merge_revision(base: &mut RevisionFields, incoming: &RevisionFields) {
    if let Some(status) = &incoming.status {
        base.status = Some(status.clone());
    }
    if let Some(title) = &incoming.title {
        base.title = Some(title.clone());
    }
    if let Some(major) = incoming.major {
        base.major = Some(major);
    }
    if let Some(minor) = incoming.minor {
        base.minor = Some(minor);
    }
    if let Some(patch) = incoming.patch {
        base.patch = Some(patch);
    }
}

/// Merge incoming slide fields into the existing state
pub(crate) fn merge_slide(base: &mut SlideFields, incoming: &SlideFields) {
    if let Some(position) = incoming.position {
        base.position = Some(position);
    }
    if let Some(media_url) = &incoming.media_url {
        base.media_url = Some(media_url.clone());
    }
    if let Some(caption) = &incoming.caption {
        base.caption = Some(caption.clone());
    }
    if let Some(layout) = &incoming.layout {
        merge_layout(&mut base.layout, layout);
    }
    // Arrays replace wholesale
    if let Some(tags) = &incoming.tags {
        base.tags = Some(tags.clone());
    }
}

/// Merge incoming track fields into the existing state
pub(crate) fn merge_track(base: &mut TrackFields, incoming: &TrackFields) {
    if let Some(seconds) = incoming.seconds {
        base.seconds = Some(seconds);
    }
    if let Some(kind) = &incoming.kind {
        base.kind = Some(kind.clone());
    }
    if let Some(prompt) = &incoming.prompt {
        base.prompt = Some(prompt.clone());
    }
    // Arrays replace wholesale
    if let Some(options) = &incoming.options {
        base.options = Some(options.clone());
    }
}

/// Nested objects merge field by field, not wholesale
fn merge_layout(base: &mut Option<SlideLayout>, incoming: &SlideLayout) {
    let target = base.get_or_insert_with(SlideLayout::default);
    if let Some(template) = &incoming.template {
        target.template = Some(template.clone());
    }
    if let Some(background) = &incoming.background {
        target.background = Some(background.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_fields_win() {
        let mut base = RevisionFields::new("rev-1");
        base.status = Some("draft".to_string());
        base.major = Some(1);

        let mut incoming = RevisionFields::new("rev-1");
        incoming.status = Some("published".to_string());

        merge_revision(&mut base, &incoming);
        assert_eq!(base.status.as_deref(), Some("published"));
        // Absent incoming fields keep the prior value
        assert_eq!(base.major, Some(1));
    }

    #[test]
    fn test_nested_layout_merges_recursively() {
        let mut base = SlideFields::new("slide-1", "rev-1");
        base.layout = Some(SlideLayout {
            template: Some("split".to_string()),
            background: Some("#fff".to_string()),
        });

        let mut incoming = SlideFields::new("slide-1", "rev-1");
        incoming.layout = Some(SlideLayout {
            template: None,
            background: Some("#000".to_string()),
        });

        merge_slide(&mut base, &incoming);
        let layout = base.layout.unwrap();
        assert_eq!(layout.template.as_deref(), Some("split"));
        assert_eq!(layout.background.as_deref(), Some("#000"));
    }

    #[test]
    fn test_layout_seeded_when_base_has_none() {
        let mut base = SlideFields::new("slide-1", "rev-1");

        let mut incoming = SlideFields::new("slide-1", "rev-1");
        incoming.layout = Some(SlideLayout {
            template: Some("full".to_string()),
            background: None,
        });

        merge_slide(&mut base, &incoming);
        assert_eq!(base.layout.unwrap().template.as_deref(), Some("full"));
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let mut base = SlideFields::new("slide-1", "rev-1");
        base.tags = Some(vec!["intro".to_string(), "draft".to_string()]);

        let mut incoming = SlideFields::new("slide-1", "rev-1");
        incoming.tags = Some(vec!["final".to_string()]);

        merge_slide(&mut base, &incoming);
        assert_eq!(base.tags, Some(vec!["final".to_string()]));
    }

    #[test]
    fn test_track_merge_precedence() {
        let mut base = TrackFields::new("track-1", "slide-1");
        base.seconds = Some(6.0);
        base.prompt = Some("What happens next?".to_string());

        let mut incoming = TrackFields::new("track-1", "slide-1");
        incoming.seconds = Some(9.5);

        merge_track(&mut base, &incoming);
        assert_eq!(base.seconds, Some(9.5));
        assert_eq!(base.prompt.as_deref(), Some("What happens next?"));
    }
}
