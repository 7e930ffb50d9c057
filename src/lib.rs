//! waypoint_pilot - Telemetry fusion and navigation commands for a MAVLink vehicle
//!
//! Four workers run on their own threads and share only two queues and a
//! [`core::LifecycleController`]:
//!
//! - [`telemetry`]: fuses LOCAL_POSITION_NED and ATTITUDE into snapshots
//! - [`command`]: turns snapshots into altitude or yaw commands
//! - [`heartbeat`]: supervises inbound heartbeats and sends our own
//! - [`orchestrator`]: starts and stops them
//!
//! The decisions themselves live in `waypoint_pilot_core`, which has no
//! threads, sockets or clocks.

// Runtime primitives: logging, lifecycle flags, queues, clock
pub mod core;

// Vehicle link trait, MAVLink UDP link, mock link
pub mod communication;

pub mod command;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod orchestrator;
pub mod telemetry;

pub use config::PilotConfig;
pub use error::PilotError;
pub use orchestrator::{Orchestrator, ShutdownReport};
