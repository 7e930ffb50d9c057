//! Top-level error type

use waypoint_pilot_core::decision::ParamsError;
use waypoint_pilot_core::heartbeat::ThresholdError;

use crate::communication::LinkError;
use crate::config::ConfigError;
use crate::core::logging::LoggingError;

/// Errors that stop the pilot or one of its components from starting
#[derive(Debug, thiserror::Error)]
pub enum PilotError {
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Invalid decision parameters: {0}")]
    DecisionParams(ParamsError),

    #[error("Invalid heartbeat monitor: {0}")]
    Threshold(ThresholdError),

    #[error("Invalid {0}: must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("Failed to spawn {name} worker: {source}")]
    Spawn {
        name: &'static str,
        source: std::io::Error,
    },
}

impl From<ParamsError> for PilotError {
    fn from(e: ParamsError) -> Self {
        PilotError::DecisionParams(e)
    }
}

impl From<ThresholdError> for PilotError {
    fn from(e: ThresholdError) -> Self {
        PilotError::Threshold(e)
    }
}
