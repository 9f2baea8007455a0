//! ISO-8601 timestamp helpers.
//!
//! Records carry their creation time as a string. Every timestamp written by
//! Sugarbook uses one fixed-width form, UTC with microseconds and an explicit
//! offset (`2026-03-01T09:30:00.000000+00:00`), so stored values also sort
//! lexicographically. Readers still parse before comparing, because older or
//! hand-edited records may use another valid RFC 3339 spelling.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant in the canonical stored form.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// The current instant in the canonical stored form.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse any RFC 3339 timestamp into UTC. Returns `None` for anything else,
/// including the empty string.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
