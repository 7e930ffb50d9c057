//! Telemetry type definitions

use core::fmt;

/// Local position and velocity (LOCAL_POSITION_NED)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionReport {
    /// Milliseconds since vehicle boot
    pub time_boot_ms: u32,
    /// Position (m)
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Velocity (m/s)
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
}

/// Orientation and angular rate (ATTITUDE)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttitudeReport {
    /// Milliseconds since vehicle boot
    pub time_boot_ms: u32,
    /// Orientation (rad)
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    /// Angular rate (rad/s)
    pub roll_speed: f32,
    pub pitch_speed: f32,
    pub yaw_speed: f32,
}

/// Fused telemetry reading.
///
/// Every field is independently optional: `None` means "not known for this
/// cycle". Snapshots built by [`TelemetrySnapshot::fuse`] have every field
/// populated; partially filled snapshots only come from callers constructing
/// one by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    /// Milliseconds since vehicle boot
    pub time_boot_ms: Option<u32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub x_velocity: Option<f32>,
    pub y_velocity: Option<f32>,
    pub z_velocity: Option<f32>,
    pub roll: Option<f32>,
    pub pitch: Option<f32>,
    pub yaw: Option<f32>,
    pub roll_speed: Option<f32>,
    pub pitch_speed: Option<f32>,
    pub yaw_speed: Option<f32>,
}

impl TelemetrySnapshot {
    /// Combine one report of each kind.
    ///
    /// The time base is the position report's, whichever arrived last.
    pub fn fuse(position: &PositionReport, attitude: &AttitudeReport) -> Self {
        Self {
            time_boot_ms: Some(position.time_boot_ms),
            x: Some(position.x),
            y: Some(position.y),
            z: Some(position.z),
            x_velocity: Some(position.vx),
            y_velocity: Some(position.vy),
            z_velocity: Some(position.vz),
            roll: Some(attitude.roll),
            pitch: Some(attitude.pitch),
            yaw: Some(attitude.yaw),
            roll_speed: Some(attitude.roll_speed),
            pitch_speed: Some(attitude.pitch_speed),
            yaw_speed: Some(attitude.yaw_speed),
        }
    }
}

struct Field<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={}ms pos=({}, {}, {}) vel=({}, {}, {}) att=({}, {}, {}) rate=({}, {}, {})",
            Field(self.time_boot_ms),
            Field(self.x),
            Field(self.y),
            Field(self.z),
            Field(self.x_velocity),
            Field(self.y_velocity),
            Field(self.z_velocity),
            Field(self.roll),
            Field(self.pitch),
            Field(self.yaw),
            Field(self.roll_speed),
            Field(self.pitch_speed),
            Field(self.yaw_speed),
        )
    }
}
