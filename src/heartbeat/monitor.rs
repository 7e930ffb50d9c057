//! Heartbeat monitor

use std::time::Duration;

use waypoint_pilot_core::heartbeat::{ConnectivityState, ConnectivityTracker, Transition};
use waypoint_pilot_core::link::MessageKind;

use crate::communication::SharedLink;
use crate::error::PilotError;
use crate::{log_error, log_info, log_warn};

/// Two-state link liveness supervisor
pub struct HeartbeatMonitor {
    link: SharedLink,
    tracker: ConnectivityTracker,
    poll_timeout: Duration,
}

impl HeartbeatMonitor {
    /// `threshold` consecutive misses mark the link Disconnected.
    pub fn new(link: SharedLink, poll_timeout: Duration, threshold: u32) -> Result<Self, PilotError> {
        if poll_timeout.is_zero() {
            return Err(PilotError::ZeroDuration("heartbeat poll timeout"));
        }
        let tracker = ConnectivityTracker::new(threshold)?;
        Ok(Self {
            link,
            tracker,
            poll_timeout,
        })
    }

    pub fn state(&self) -> ConnectivityState {
        self.tracker.state()
    }

    /// Wait up to the poll timeout for one heartbeat and update the state.
    ///
    /// A receive error counts as a miss.
    pub fn run(&mut self) -> ConnectivityState {
        let received = match self.link.recv(MessageKind::Heartbeat, self.poll_timeout) {
            Ok(msg) => msg.is_some(),
            Err(e) => {
                log_warn!("Failed to receive HEARTBEAT: {}", e);
                false
            }
        };

        let transition = if received {
            self.tracker.record_success()
        } else {
            self.tracker.record_miss()
        };
        let state = self.tracker.state();
        let threshold = self.tracker.threshold();

        match transition {
            Transition::Steady => log_info!("Heartbeat received: {}", state.connectivity),
            Transition::Recovered => log_info!("Heartbeat received: connection restored"),
            Transition::Missed => {
                log_warn!("Heartbeat missed ({}/{})", state.missed_count, threshold)
            }
            Transition::Lost => log_error!(
                "Heartbeat missed {} times: {}",
                state.missed_count,
                state.connectivity
            ),
            Transition::StillLost => log_error!(
                "Heartbeat missed ({} in a row): still {}",
                state.missed_count,
                state.connectivity
            ),
        }
        state
    }
}
