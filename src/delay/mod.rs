//! The delay-evaluation pipeline.
//!
//! Every step is a pure function over its inputs:
//!
//! ```text
//! DepartureBoard (raw JSON)
//!        │
//!        ▼
//! extract_departures()  ──▶ Vec<DelayRecord>
//!        │
//!        ▼
//! convert_minutes()     ──▶ whole-minute delays
//!        │
//!        ▼
//! compare_to_threshold() ──▶ offense flags
//!        │
//!        ▼
//! percentage_of_offenders() ──▶ integer percentage in [0, 100]
//! ```
//!
//! ## Submodules
//!
//! - [`departure`]: Timestamp parsing and normalization into [`DelayRecord`]
//! - [`threshold`]: Minute conversion, offense flags, and aggregation

pub mod departure;
pub mod threshold;

pub use departure::{extract_departures, structure_departure, DelayRecord};
pub use threshold::{
    compare_to_threshold, convert_minutes, percentage_of_offenders, to_whole_minutes,
};

use crate::api::{DepartureBoard, TrafficType};
use crate::error::CheckError;

/// Run the whole pipeline over one departure board: the percentage of
/// departures in the requested category delayed at least `minutes` whole
/// minutes. A board with no departures for the category yields 0.
pub fn delayed_percentage(
    board: &DepartureBoard,
    traffic_type: TrafficType,
    minutes: u32,
) -> Result<u8, CheckError> {
    let records = extract_departures(board, traffic_type)?;
    let delays = convert_minutes(&records);
    let flags = compare_to_threshold(&delays, minutes);
    Ok(percentage_of_offenders(&flags))
}
