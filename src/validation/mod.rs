//! Structural validation for incoming events
//!
//! Validation runs before any log append, so a malformed event never
//! reaches an audit log.

mod events;

pub use events::validate_event;
