//! Link supervision
//!
//! The monitor watches inbound heartbeats and reports connectivity; the
//! sender keeps the vehicle aware of this ground station. Neither feeds the
//! command pipeline.

mod monitor;
mod sender;
mod worker;

pub use monitor::HeartbeatMonitor;
pub use sender::HeartbeatSender;
pub use worker::{heartbeat_receiver_worker, heartbeat_sender_worker};
