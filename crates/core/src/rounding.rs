//! Rounding of time-entry endpoints to the planning grid.
//!
//! Sloneek plans in 15-minute slots, so both endpoints of every entry
//! are rounded to the nearest quarter hour before mapping.

use crate::error::CoreError;
use crate::types::{TimeEntry, Timestamp};

/// Planning grid granularity in seconds (15 minutes).
pub const ROUNDING_STEP_SECS: i64 = 15 * 60;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Round a timestamp to the nearest multiple of 15 minutes, measured
/// from the Unix epoch.
///
/// An exact midpoint (7 m 30 s past a boundary) rounds up. Sub-second
/// precision participates in the comparison and is dropped from the
/// result.
pub fn round_to_quarter_hour(t: Timestamp) -> Timestamp {
    let secs = t.timestamp();
    let rem = secs.rem_euclid(ROUNDING_STEP_SECS);
    let floor = secs - rem;

    let past_floor_nanos = rem * NANOS_PER_SEC + i64::from(t.timestamp_subsec_nanos());
    let rounded = if past_floor_nanos * 2 >= ROUNDING_STEP_SECS * NANOS_PER_SEC {
        floor + ROUNDING_STEP_SECS
    } else {
        floor
    };

    chrono::DateTime::from_timestamp(rounded, 0)
        .expect("a timestamp rounded to a quarter hour stays in chrono's range")
}

/// Round a time entry's endpoints in place.
///
/// Fails when the entry has no stop time (it is still running), since
/// such an entry cannot be placed on the planning grid. Idempotent: an
/// already-rounded entry is unchanged. An entry shorter than the grid
/// step may legitimately collapse to zero duration.
pub fn round_entry(entry: &mut TimeEntry) -> Result<(), CoreError> {
    let stop = entry.stop.ok_or(CoreError::InvalidEntry {
        entry_id: entry.id,
        reason: "entry has no stop time",
    })?;

    entry.start = round_to_quarter_hour(entry.start);
    entry.stop = Some(round_to_quarter_hour(stop));
    Ok(())
}
