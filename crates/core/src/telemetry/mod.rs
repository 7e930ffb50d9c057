//! Telemetry types and fusion
//!
//! - `PositionReport` / `AttitudeReport`: the two partial reports a vehicle streams
//! - `TelemetrySnapshot`: one fused, immutable reading
//! - `FusionAttempt`: deadline-bounded pairing of the two partial reports

mod fusion;
mod types;

pub use fusion::{FusionAttempt, FusionStatus};
pub use types::{AttitudeReport, PositionReport, TelemetrySnapshot};
