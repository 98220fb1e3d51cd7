//! Departure normalization: raw API records into structured delay records.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::api::{Departure, DepartureBoard, TrafficType};
use crate::error::CheckError;

/// Timestamp format used by the API. No zone offset is carried; both
/// timestamps are assumed to share the same implicit zone, so the
/// subtraction is done naively with no conversion.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single departure with its computed delay.
///
/// The delay is never negative: an expected time at or before the scheduled
/// time is an on-time departure, not a negative delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayRecord {
    pub scheduled: NaiveDateTime,
    pub expected: NaiveDateTime,
    pub delay: Duration,
}

/// Normalize one raw departure into a [`DelayRecord`].
///
/// A malformed timestamp is fatal for the whole run.
pub fn structure_departure(departure: &Departure) -> Result<DelayRecord, CheckError> {
    let scheduled = parse_datetime(&departure.time_tabled_date_time)?;
    let expected = parse_datetime(&departure.expected_date_time)?;

    let delay = if expected > scheduled {
        Duration::from_secs((expected - scheduled).num_seconds() as u64)
    } else {
        Duration::ZERO
    };

    Ok(DelayRecord {
        scheduled,
        expected,
        delay,
    })
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, CheckError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|e| CheckError::Decode(format!("invalid timestamp '{value}': {e}")))
}

/// Normalize every departure of the requested traffic category, in source
/// order. An absent or empty category yields an empty vec.
pub fn extract_departures(
    board: &DepartureBoard,
    traffic_type: TrafficType,
) -> Result<Vec<DelayRecord>, CheckError> {
    board
        .departures(traffic_type)
        .iter()
        .map(structure_departure)
        .collect()
}
