//! External view document shapes
//!
//! The projection layer converts internal snapshots into these types, which
//! are the unit of compatibility for consumers: internal bookkeeping
//! (version ids, fold actions, actor metadata) never appears here, and the
//! one-level `previous` ancestor is rendered in the same shape as the head,
//! one document shape per entity kind.

use serde::{Deserialize, Serialize};

use super::event::{SlideFields, TrackFields};

/// Client-facing revision document body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRevision {
    /// Semantic version composed from the revision's numeric components
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    pub slides: Vec<SlideInRevision>,
}

/// A slide as rendered inside a revision view
///
/// Tracks are flattened out at this level; the top-level slide view is the
/// place to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideInRevision {
    #[serde(rename = "lessonSlide")]
    pub lesson_slide: SlideFields,
}

/// Revision view document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionView {
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(rename = "lessonRevision")]
    pub lesson_revision: LessonRevision,
    /// Prior state in the same shape, one level only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<RevisionView>>,
}

/// Client-facing slide document body, tracks included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSlide {
    #[serde(flatten)]
    pub fields: SlideFields,
    #[serde(default)]
    pub tracks: Vec<TrackFields>,
}

/// Top-level slide view document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideView {
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(rename = "lessonSlide")]
    pub lesson_slide: LessonSlide,
    /// Prior state in the same shape, one level only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<SlideView>>,
}
