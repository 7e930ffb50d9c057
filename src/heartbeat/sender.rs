//! Ground-station heartbeat sender

use crate::communication::{LinkError, SharedLink};

/// Sends one GCS HEARTBEAT per call
pub struct HeartbeatSender {
    link: SharedLink,
    sent: u64,
}

impl HeartbeatSender {
    pub fn new(link: SharedLink) -> Self {
        Self { link, sent: 0 }
    }

    pub fn run(&mut self) -> Result<(), LinkError> {
        self.link.send_heartbeat()?;
        self.sent += 1;
        Ok(())
    }

    /// Heartbeats successfully sent
    pub fn sent(&self) -> u64 {
        self.sent
    }
}
