//! Connectivity state machine

use core::fmt;

/// Consecutive misses before the link is declared lost
pub const DEFAULT_DISCONNECT_THRESHOLD: u32 = 5;

/// Link status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Connected => f.write_str("Connected"),
            Connectivity::Disconnected => f.write_str("Disconnected"),
        }
    }
}

/// Status plus consecutive missed polls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectivityState {
    pub connectivity: Connectivity,
    pub missed_count: u32,
}

impl ConnectivityState {
    pub fn is_connected(&self) -> bool {
        self.connectivity == Connectivity::Connected
    }
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Connected,
            missed_count: 0,
        }
    }
}

/// What a single poll result did to the state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Heartbeat received while connected
    Steady,
    /// Heartbeat received while disconnected
    Recovered,
    /// Missed, still below the threshold
    Missed,
    /// Missed and reached the threshold: Connected -> Disconnected
    Lost,
    /// Missed while already disconnected
    StillLost,
}

/// A disconnect threshold of zero would start the link disconnected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdError;

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("disconnect threshold must be at least 1")
    }
}

/// Connectivity tracker.
///
/// Starts `Connected` with no misses. No terminal state.
#[derive(Clone, Copy, Debug)]
pub struct ConnectivityTracker {
    state: ConnectivityState,
    threshold: u32,
}

impl ConnectivityTracker {
    pub fn new(threshold: u32) -> Result<Self, ThresholdError> {
        if threshold == 0 {
            return Err(ThresholdError);
        }
        Ok(Self {
            state: ConnectivityState::default(),
            threshold,
        })
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Record a received heartbeat
    pub fn record_success(&mut self) -> Transition {
        let was = self.state.connectivity;
        self.state = ConnectivityState::default();
        match was {
            Connectivity::Connected => Transition::Steady,
            Connectivity::Disconnected => Transition::Recovered,
        }
    }

    /// Record a missed heartbeat
    pub fn record_miss(&mut self) -> Transition {
        self.state.missed_count = self.state.missed_count.saturating_add(1);
        if self.state.missed_count < self.threshold {
            return Transition::Missed;
        }
        match self.state.connectivity {
            Connectivity::Connected => {
                self.state.connectivity = Connectivity::Disconnected;
                Transition::Lost
            }
            Connectivity::Disconnected => Transition::StillLost,
        }
    }
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self {
            state: ConnectivityState::default(),
            threshold: DEFAULT_DISCONNECT_THRESHOLD,
        }
    }
}
