//! Change event types for the audit logs
//!
//! Events are immutable reports of create/update/delete changes against one
//! domain entity. Each event carries a typed payload for its entity kind;
//! the payload always includes the externally-assigned domain id and, for
//! child entities, the parent reference.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::current_timestamp_millis;

/// The three levels of the content hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Top-level versioned content container
    Revision,
    /// Ordered child of a revision
    Slide,
    /// Child of a slide (e.g. a timed question cue)
    Track,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Revision => write!(f, "revision"),
            EntityKind::Slide => write!(f, "slide"),
            EntityKind::Track => write!(f, "track"),
        }
    }
}

/// Reported change action
///
/// Actions outside the recognized vocabulary deserialize into
/// [`EventAction::Other`] instead of failing; the fold step treats them as
/// reported no-ops rather than rejecting the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
    /// Any action outside {created, updated, deleted}
    Other(String),
}

impl EventAction {
    /// Parse an action string; unrecognized values are preserved verbatim
    pub fn parse(value: &str) -> Self {
        match value {
            "created" => EventAction::Created,
            "updated" => EventAction::Updated,
            "deleted" => EventAction::Deleted,
            other => EventAction::Other(other.to_string()),
        }
    }

    /// String form used on the wire and in reports
    pub fn as_str(&self) -> &str {
        match self {
            EventAction::Created => "created",
            EventAction::Updated => "updated",
            EventAction::Deleted => "deleted",
            EventAction::Other(value) => value,
        }
    }

    /// Whether this action participates in folds
    pub fn is_recognized(&self) -> bool {
        !matches!(self, EventAction::Other(_))
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EventAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(EventAction::parse(&value))
    }
}

/// Who reported the change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub email: String,
}

impl Actor {
    /// Create an actor from an email address
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Revision payload fields
///
/// Non-id fields are optional so update events can carry partial payloads;
/// the merge rules in the engine decide field precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionFields {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<u32>,
}

impl RevisionFields {
    /// Create revision fields with just the domain id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
            title: None,
            major: None,
            minor: None,
            patch: None,
        }
    }

    /// Compose the semantic version string from the three numeric
    /// components; missing components read as 0
    pub fn semantic_version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0)
        )
    }
}

/// Nested layout object on a slide
///
/// This is the nested-object case of the merge rules: updates merge into it
/// field by field instead of replacing it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SlideLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// Slide payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideFields {
    pub id: String,
    #[serde(rename = "revisionId")]
    pub revision_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(rename = "mediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<SlideLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SlideFields {
    /// Create slide fields with the domain id and parent revision id
    pub fn new(id: impl Into<String>, revision_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            revision_id: revision_id.into(),
            position: None,
            media_url: None,
            caption: None,
            layout: None,
            tags: None,
        }
    }
}

/// Track payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFields {
    pub id: String,
    #[serde(rename = "slideId")]
    pub slide_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl TrackFields {
    /// Create track fields with the domain id and parent slide id
    pub fn new(id: impl Into<String>, slide_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slide_id: slide_id.into(),
            seconds: None,
            kind: None,
            prompt: None,
            options: None,
        }
    }
}

/// Typed event payload, tagged by entity kind
///
/// The fold dispatch matches on this enum exhaustively; there is no untyped
/// branching on a kind string anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entityKind", content = "payload", rename_all = "snake_case")]
pub enum EventPayload {
    Revision(RevisionFields),
    Slide(SlideFields),
    Track(TrackFields),
}

impl EventPayload {
    /// Entity kind of this payload
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            EventPayload::Revision(_) => EntityKind::Revision,
            EventPayload::Slide(_) => EntityKind::Slide,
            EventPayload::Track(_) => EntityKind::Track,
        }
    }

    /// Externally-assigned domain id of the changed entity
    pub fn domain_id(&self) -> &str {
        match self {
            EventPayload::Revision(fields) => &fields.id,
            EventPayload::Slide(fields) => &fields.id,
            EventPayload::Track(fields) => &fields.id,
        }
    }

    /// Parent reference, when the entity kind has one
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            EventPayload::Revision(_) => None,
            EventPayload::Slide(fields) => Some(&fields.revision_id),
            EventPayload::Track(fields) => Some(&fields.slide_id),
        }
    }
}

/// An immutable change event
///
/// Events are never mutated once recorded; the audit log keeps them verbatim
/// and the snapshot builders fold them into new versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "eventKind")]
    pub action: EventAction,
    #[serde(rename = "occurredAt")]
    pub occurred_at: u64,
    #[serde(flatten)]
    pub payload: EventPayload,
    pub actor: Actor,
}

impl ChangeEvent {
    /// Create an event with the current timestamp
    pub fn new(action: EventAction, payload: EventPayload, actor: Actor) -> Self {
        Self {
            action,
            occurred_at: current_timestamp_millis(),
            payload,
            actor,
        }
    }

    /// Override the occurrence timestamp
    pub fn with_occurred_at(mut self, occurred_at: u64) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Entity kind of the event's payload
    pub fn entity_kind(&self) -> EntityKind {
        self.payload.entity_kind()
    }

    /// Domain id of the changed entity
    pub fn domain_id(&self) -> &str {
        self.payload.domain_id()
    }
}

/// An event plus its store-assigned record id and insertion timestamp
///
/// Audit records are append-only; the store never mutates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(rename = "recordId")]
    pub record_id: u64,
    #[serde(rename = "recordedAt")]
    pub recorded_at: u64,
    #[serde(flatten)]
    pub event: ChangeEvent,
}
