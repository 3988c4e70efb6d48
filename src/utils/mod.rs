//! Utility functions and helpers
//!
//! This module contains timestamp utilities shared by the stores.

pub mod time;

pub use time::current_timestamp_millis;
