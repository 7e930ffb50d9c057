//! Link connectivity supervision
//!
//! Two-state model with miss-count hysteresis: a run of consecutive missed
//! heartbeats drops the link to `Disconnected`, and a single received
//! heartbeat brings it straight back.

mod tracker;

pub use tracker::{
    Connectivity, ConnectivityState, ConnectivityTracker, ThresholdError, Transition,
    DEFAULT_DISCONNECT_THRESHOLD,
};
