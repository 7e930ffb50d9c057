//! Link trait and errors

use std::sync::Arc;
use std::time::Duration;

use waypoint_pilot_core::link::{LinkMessage, MessageKind, VehicleCommand};

/// Errors raised by a vehicle link
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode {message}: {reason}")]
    Encode {
        message: &'static str,
        reason: String,
    },

    #[error("Peer address not yet known")]
    PeerUnknown,

    #[error("Link closed")]
    Closed,
}

/// Bidirectional typed connection to one vehicle.
///
/// Implementations are shared between worker threads, so every method takes
/// `&self`.
pub trait VehicleLink: Send + Sync {
    /// Wait up to `timeout` for the next message of `kind`.
    ///
    /// A zero timeout never blocks. `Ok(None)` means nothing arrived in time.
    fn recv(&self, kind: MessageKind, timeout: Duration)
        -> Result<Option<LinkMessage>, LinkError>;

    /// Transmit one command to the vehicle.
    fn send_command(&self, command: &VehicleCommand) -> Result<(), LinkError>;

    /// Transmit one ground-station heartbeat.
    fn send_heartbeat(&self) -> Result<(), LinkError>;
}

/// Link handle passed to workers
pub type SharedLink = Arc<dyn VehicleLink>;
