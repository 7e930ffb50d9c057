//! Telemetry fusion: link reports in, snapshots out to the command worker

mod fuser;
mod worker;

pub use fuser::{FusionTimeout, TelemetryFuser};
pub use worker::telemetry_worker;
