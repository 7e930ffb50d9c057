//! Deadline-bounded fusion of partial reports
//!
//! A `FusionAttempt` collects at most one report of each kind. It completes as
//! soon as both are held and expires once the budget has elapsed without
//! that. Nothing carries over between attempts: the caller starts a fresh
//! attempt for every cycle, so an expired attempt's partial data is dropped
//! with it.

use super::{AttitudeReport, PositionReport, TelemetrySnapshot};

/// Result of polling an attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FusionStatus {
    /// Still waiting, budget not yet spent
    Pending,
    /// Both reports held
    Complete(TelemetrySnapshot),
    /// Budget spent before both reports arrived
    Expired,
}

/// One fusion cycle
#[derive(Clone, Copy, Debug)]
pub struct FusionAttempt {
    started_us: u64,
    budget_us: u64,
    position: Option<PositionReport>,
    attitude: Option<AttitudeReport>,
}

impl FusionAttempt {
    /// Start an attempt at `started_us` with a budget of `budget_us`
    pub const fn new(started_us: u64, budget_us: u64) -> Self {
        Self {
            started_us,
            budget_us,
            position: None,
            attitude: None,
        }
    }

    /// Offer a position report. Keeps the first one received.
    pub fn offer_position(&mut self, report: PositionReport) {
        self.position.get_or_insert(report);
    }

    /// Offer an attitude report. Keeps the first one received.
    pub fn offer_attitude(&mut self, report: AttitudeReport) {
        self.attitude.get_or_insert(report);
    }

    pub fn needs_position(&self) -> bool {
        self.position.is_none()
    }

    pub fn needs_attitude(&self) -> bool {
        self.attitude.is_none()
    }

    /// Time at which the budget runs out
    pub fn deadline_us(&self) -> u64 {
        self.started_us.saturating_add(self.budget_us)
    }

    /// Check the attempt at `now_us`.
    ///
    /// Completion wins over expiry when both reports are held at the deadline.
    pub fn poll(&self, now_us: u64) -> FusionStatus {
        if let (Some(position), Some(attitude)) = (&self.position, &self.attitude) {
            return FusionStatus::Complete(TelemetrySnapshot::fuse(position, attitude));
        }
        if now_us >= self.deadline_us() {
            FusionStatus::Expired
        } else {
            FusionStatus::Pending
        }
    }
}
