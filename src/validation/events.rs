//! Event well-formedness checks

use crate::types::{ChangeEvent, EngineError, EngineResult, EventPayload};

/// Check that an event carries its required domain id and, for child
/// entities, the parent reference
///
/// This is structural well-formedness only; business rules are out of
/// scope. Unrecognized event actions are accepted here and handled as
/// reported no-ops at the fold step.
pub fn validate_event(event: &ChangeEvent) -> EngineResult<()> {
    match &event.payload {
        EventPayload::Revision(fields) => {
            require(!fields.id.is_empty(), "revision event missing id")?;
        }
        EventPayload::Slide(fields) => {
            require(!fields.id.is_empty(), "slide event missing id")?;
            require(
                !fields.revision_id.is_empty(),
                "slide event missing revisionId",
            )?;
        }
        EventPayload::Track(fields) => {
            require(!fields.id.is_empty(), "track event missing id")?;
            require(!fields.slide_id.is_empty(), "track event missing slideId")?;
        }
    }
    Ok(())
}

fn require(condition: bool, message: &str) -> EngineResult<()> {
    if condition {
        Ok(())
    } else {
        Err(EngineError::MalformedEvent(message.to_string()))
    }
}
