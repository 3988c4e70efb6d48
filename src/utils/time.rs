//! Time and timestamp utilities

use chrono::Utc;

/// Get current Unix timestamp in milliseconds
///
/// Millisecond resolution keeps event `occurredAt` values and store
/// insertion timestamps comparable; ordering ties are broken by the
/// store-assigned ids, not by this clock.
pub fn current_timestamp_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
