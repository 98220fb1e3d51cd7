//! # check_sl_delay
//!
//! A monitoring plugin that checks the percentage of delayed departures at a
//! Stockholm public transport (SL) site and reports it following the
//! monitoring-plugin contract: one status line on stdout, exit codes 0-4,
//! and a trailing perfdata segment.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  api (HTTP fetch)                                         │
//! │    │  site lookup + departure board                       │
//! │    ▼                                                      │
//! │  delay (pure pipeline)                                    │
//! │    │  normalize -> minutes -> offense flags -> percentage │
//! │    ▼                                                      │
//! │  state (verdict)  ──▶  report (status line + perfdata)    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: SL API client and wire types (site lookup, departures)
//! - **[`delay`]**: The delay-evaluation pipeline, pure functions throughout
//! - **[`state`]**: The verdict (`OK`/`WARNING`/`CRITICAL`/...) and the
//!   threshold decision policy
//! - **[`report`]**: Bit-exact status line and perfdata rendering
//! - **[`error`]**: The fatal-error taxonomy, each mapping to a verdict
//!
//! The pipeline runs once per invocation, single-threaded, under one
//! wall-clock deadline; partial results are never reported.

pub mod api;
pub mod delay;
pub mod error;
pub mod report;
pub mod state;

pub use api::{DepartureBoard, DepartureResponse, SlClient, TrafficType};
pub use delay::{delayed_percentage, DelayRecord};
pub use error::CheckError;
pub use report::Report;
pub use state::{determine_state, ServiceState};
