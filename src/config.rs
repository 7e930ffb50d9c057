//! Runtime configuration
//!
//! Every section has defaults, so an empty JSON object (or no file at all) is
//! a valid configuration. Command-line flags are applied on top by the binary,
//! then [`PilotConfig::validate`] checks the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use waypoint_pilot_core::decision::DecisionParams;
use waypoint_pilot_core::heartbeat::DEFAULT_DISCONNECT_THRESHOLD;
use waypoint_pilot_core::navigation::Position;

use crate::core::queue::DEFAULT_QUEUE_CAPACITY;

/// Errors raised while loading or checking configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete runtime configuration
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PilotConfig {
    pub link: LinkConfig,
    pub target: TargetConfig,
    pub decision: DecisionConfig,
    pub fusion: FusionConfig,
    pub heartbeat: HeartbeatConfig,
    pub queues: QueueConfig,
    pub logging: LoggingConfig,
    pub run: RunConfig,
}

/// Vehicle link endpoint and identity
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Local UDP address to bind
    pub bind: String,
    /// Vehicle address; learned from the first datagram when absent
    pub peer: Option<String>,
    /// Our MAVLink system id (255 = ground station)
    pub system_id: u8,
    /// Our MAVLink component id (190 = MAV_COMP_ID_MISSIONPLANNER)
    pub component_id: u8,
    /// Vehicle system id addressed by commands
    pub target_system: u8,
    /// Vehicle component id addressed by commands
    pub target_component: u8,
    /// Per-kind inbox capacity in the link
    pub inbox_capacity: usize,
    /// Socket read timeout for the reader thread (ms)
    pub read_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:14550".to_string(),
            peer: None,
            system_id: 255,
            component_id: 190,
            target_system: 1,
            target_component: 0,
            inbox_capacity: 32,
            read_timeout_ms: 100,
        }
    }
}

/// Target position in the local NED frame (m)
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TargetConfig {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }
}

/// Decision policy tolerances and command rates
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionConfig {
    pub height_tolerance_m: f32,
    pub angle_tolerance_deg: f32,
    pub climb_rate_ms: f32,
    pub yaw_rate_deg_s: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        let params = DecisionParams::default();
        Self {
            height_tolerance_m: params.height_tolerance_m,
            angle_tolerance_deg: params.angle_tolerance_rad.to_degrees(),
            climb_rate_ms: params.climb_rate_ms,
            yaw_rate_deg_s: params.yaw_rate_deg_s,
        }
    }
}

impl DecisionConfig {
    pub fn params(&self) -> DecisionParams {
        DecisionParams {
            height_tolerance_m: self.height_tolerance_m,
            angle_tolerance_rad: self.angle_tolerance_deg.to_radians(),
            climb_rate_ms: self.climb_rate_ms,
            yaw_rate_deg_s: self.yaw_rate_deg_s,
        }
    }
}

/// Telemetry fusion timing
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FusionConfig {
    /// Time allowed to collect both reports (ms)
    pub budget_ms: u64,
    /// Sleep between poll rounds (ms)
    pub poll_interval_ms: u64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            budget_ms: 1000,
            poll_interval_ms: 10,
        }
    }
}

impl FusionConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Heartbeat supervision and transmission
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeartbeatConfig {
    /// Wait for one inbound heartbeat (ms)
    pub poll_timeout_ms: u64,
    /// Consecutive misses before the link is reported lost
    pub disconnect_threshold: u32,
    /// Outbound heartbeat period (ms)
    pub send_period_ms: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 1000,
            disconnect_threshold: DEFAULT_DISCONNECT_THRESHOLD,
            send_period_ms: 1000,
        }
    }
}

impl HeartbeatConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn send_period(&self) -> Duration {
        Duration::from_millis(self.send_period_ms)
    }
}

/// Inter-worker queue capacities
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    pub telemetry_capacity: usize,
    pub report_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            telemetry_capacity: DEFAULT_QUEUE_CAPACITY,
            report_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Log output
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Write a log file per run into this directory
    pub directory: Option<PathBuf>,
    /// Also log to stdout
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            console: true,
        }
    }
}

/// Run length
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Stop after this many seconds; run until killed when absent
    pub duration_secs: Option<u64>,
}

impl PilotConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decision
            .params()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("decision: {e}")))?;

        let target = self.target;
        if !(target.x.is_finite() && target.y.is_finite() && target.z.is_finite()) {
            return invalid("target: coordinates must be finite");
        }
        if self.fusion.budget_ms == 0 {
            return invalid("fusion.budget_ms must be greater than zero");
        }
        if self.fusion.poll_interval_ms == 0 {
            return invalid("fusion.poll_interval_ms must be greater than zero");
        }
        if self.heartbeat.poll_timeout_ms == 0 {
            return invalid("heartbeat.poll_timeout_ms must be greater than zero");
        }
        if self.heartbeat.disconnect_threshold == 0 {
            return invalid("heartbeat.disconnect_threshold must be at least 1");
        }
        if self.heartbeat.send_period_ms == 0 {
            return invalid("heartbeat.send_period_ms must be greater than zero");
        }
        if self.queues.telemetry_capacity == 0 || self.queues.report_capacity == 0 {
            return invalid("queue capacities must be greater than zero");
        }
        if self.link.inbox_capacity == 0 {
            return invalid("link.inbox_capacity must be greater than zero");
        }
        if self.link.read_timeout_ms == 0 {
            return invalid("link.read_timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(reason.to_string()))
}
