//! Telemetry fuser
//!
//! Polls the link for one LOCAL_POSITION_NED and one ATTITUDE report within a
//! time budget and combines them. Each call to [`TelemetryFuser::run`] starts
//! from nothing. Every poll drains the backlog of a kind and keeps only the
//! newest report, so a snapshot never pairs fresh data with stale data.

use std::thread;
use std::time::Duration;

use waypoint_pilot_core::link::{LinkMessage, MessageKind};
use waypoint_pilot_core::telemetry::{FusionAttempt, FusionStatus, TelemetrySnapshot};
use waypoint_pilot_core::traits::TimeSource;

use crate::communication::SharedLink;
use crate::core::MonotonicTime;
use crate::error::PilotError;
use crate::{log_info, log_warn};

/// Budget spent before both reports arrived; partial data was discarded
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no complete telemetry within {budget_ms} ms (missing {missing})")]
pub struct FusionTimeout {
    pub budget_ms: u64,
    /// Report kind(s) not received
    pub missing: &'static str,
}

/// Combines partial reports into snapshots
pub struct TelemetryFuser<T: TimeSource = MonotonicTime> {
    link: SharedLink,
    time: T,
    budget: Duration,
    poll_interval: Duration,
}

impl TelemetryFuser<MonotonicTime> {
    pub fn new(
        link: SharedLink,
        budget: Duration,
        poll_interval: Duration,
    ) -> Result<Self, PilotError> {
        Self::with_time(link, budget, poll_interval, MonotonicTime::new())
    }
}

impl<T: TimeSource> TelemetryFuser<T> {
    /// Create a fuser measuring its budget against `time`.
    pub fn with_time(
        link: SharedLink,
        budget: Duration,
        poll_interval: Duration,
        time: T,
    ) -> Result<Self, PilotError> {
        if budget.is_zero() {
            return Err(PilotError::ZeroDuration("fusion budget"));
        }
        if poll_interval.is_zero() {
            return Err(PilotError::ZeroDuration("fusion poll interval"));
        }
        Ok(Self {
            link,
            time,
            budget,
            poll_interval,
        })
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Collect one report of each kind, or time out.
    pub fn run(&self) -> Result<TelemetrySnapshot, FusionTimeout> {
        let budget_us = u64::try_from(self.budget.as_micros()).unwrap_or(u64::MAX);
        let mut attempt = FusionAttempt::new(self.time.now_us(), budget_us);

        loop {
            if attempt.needs_position() {
                if let Some(LinkMessage::Position(report)) = self.latest(MessageKind::Position) {
                    log_info!("Received LOCAL_POSITION_NED (t={}ms)", report.time_boot_ms);
                    attempt.offer_position(report);
                }
            }
            if attempt.needs_attitude() {
                if let Some(LinkMessage::Attitude(report)) = self.latest(MessageKind::Attitude) {
                    log_info!("Received ATTITUDE (t={}ms)", report.time_boot_ms);
                    attempt.offer_attitude(report);
                }
            }

            match attempt.poll(self.time.now_us()) {
                FusionStatus::Complete(snapshot) => {
                    log_info!("Created telemetry snapshot: {}", snapshot);
                    return Ok(snapshot);
                }
                FusionStatus::Expired => {
                    let missing = match (attempt.needs_position(), attempt.needs_attitude()) {
                        (true, true) => "LOCAL_POSITION_NED and ATTITUDE",
                        (true, false) => "LOCAL_POSITION_NED",
                        _ => "ATTITUDE",
                    };
                    let timeout = FusionTimeout {
                        budget_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
                        missing,
                    };
                    log_warn!("Timeout: {}", timeout);
                    return Err(timeout);
                }
                FusionStatus::Pending => thread::sleep(self.poll_interval),
            }
        }
    }

    /// Newest queued message of `kind`, without blocking.
    ///
    /// Older messages are discarded. Link errors count as nothing received.
    fn latest(&self, kind: MessageKind) -> Option<LinkMessage> {
        let mut latest = None;
        loop {
            match self.link.recv(kind, Duration::ZERO) {
                Ok(Some(msg)) => latest = Some(msg),
                Ok(None) => return latest,
                Err(e) => {
                    log_warn!("Failed to receive {}: {}", kind.as_str(), e);
                    return latest;
                }
            }
        }
    }
}
