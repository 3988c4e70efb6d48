//! Materialized snapshot types
//!
//! A snapshot is the immutable, fully-denormalized state of one entity at
//! one version. Every accepted fold produces a new version that references
//! the superseded one through `previous`, forming a simple singly-linked
//! chain per domain id. Revision snapshots embed the current state of their
//! slides, and each embedded slide carries its current tracks.

use serde::{Deserialize, Serialize};

use super::event::{EventAction, RevisionFields, SlideFields, TrackFields};

/// Store-assigned id of one snapshot version
///
/// Version ids are generated per snapshot store and increase with insertion
/// order, which makes them the authoritative tie-break when two versions
/// share a `createdAt` timestamp.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct VersionId(pub u64);

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A slide's state embedded inside a revision snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideEntry {
    pub fields: SlideFields,
    #[serde(default)]
    pub tracks: Vec<TrackFields>,
}

impl SlideEntry {
    /// Create an entry with no tracks yet
    pub fn new(fields: SlideFields) -> Self {
        Self {
            fields,
            tracks: Vec::new(),
        }
    }
}

/// One version of a revision's denormalized state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionSnapshot {
    pub version: VersionId,
    #[serde(rename = "revisionId")]
    pub domain_id: String,
    /// Action that produced this version
    pub action: EventAction,
    pub fields: RevisionFields,
    #[serde(default)]
    pub slides: Vec<SlideEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<VersionId>,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}

impl RevisionSnapshot {
    /// Find the embedded slide entry for a slide domain id
    pub fn find_slide(&self, slide_id: &str) -> Option<&SlideEntry> {
        self.slides.iter().find(|entry| entry.fields.id == slide_id)
    }

    /// Mutable access to the embedded slide entry for a slide domain id
    pub fn find_slide_mut(&mut self, slide_id: &str) -> Option<&mut SlideEntry> {
        self.slides
            .iter_mut()
            .find(|entry| entry.fields.id == slide_id)
    }
}

/// One version of a slide's denormalized state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSnapshot {
    pub version: VersionId,
    #[serde(rename = "slideId")]
    pub domain_id: String,
    /// Action that produced this version
    pub action: EventAction,
    pub fields: SlideFields,
    #[serde(default)]
    pub tracks: Vec<TrackFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<VersionId>,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}
