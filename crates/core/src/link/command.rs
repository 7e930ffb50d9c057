//! Outbound vehicle commands
//!
//! Commands carry the MAVLink command identifier and its seven float
//! parameters, so any link can forward them as a COMMAND_LONG without
//! knowing the decision that produced them.

/// MAV_CMD_CONDITION_CHANGE_ALT
pub const MAV_CMD_CONDITION_CHANGE_ALT: u16 = 113;

/// MAV_CMD_CONDITION_YAW
pub const MAV_CMD_CONDITION_YAW: u16 = 115;

/// Yaw rotation direction as encoded in CONDITION_YAW param3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YawDirection {
    Clockwise,
    CounterClockwise,
}

impl YawDirection {
    /// Direction for a signed angle difference in degrees.
    ///
    /// Non-negative differences turn clockwise. This sign convention has not
    /// been checked against a real vehicle.
    pub fn from_diff_deg(diff_deg: f32) -> Self {
        if diff_deg >= 0.0 {
            YawDirection::Clockwise
        } else {
            YawDirection::CounterClockwise
        }
    }

    /// Wire value: 1 = clockwise, -1 = counter-clockwise
    pub const fn as_param(self) -> f32 {
        match self {
            YawDirection::Clockwise => 1.0,
            YawDirection::CounterClockwise => -1.0,
        }
    }
}

/// Corrective command for the vehicle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VehicleCommand {
    /// Climb or descend toward an absolute altitude
    ChangeAltitude {
        /// Target altitude (m)
        target_altitude: f32,
        /// Climb/descent rate (m/s)
        climb_rate: f32,
    },
    /// Rotate by an angle
    ConditionYaw {
        /// Angle (deg)
        angle_deg: f32,
        /// Angular speed (deg/s)
        rate_deg_s: f32,
        direction: YawDirection,
        /// Angle is relative to current heading
        relative: bool,
    },
}

impl VehicleCommand {
    /// MAVLink command identifier
    pub const fn command_id(&self) -> u16 {
        match self {
            VehicleCommand::ChangeAltitude { .. } => MAV_CMD_CONDITION_CHANGE_ALT,
            VehicleCommand::ConditionYaw { .. } => MAV_CMD_CONDITION_YAW,
        }
    }

    /// COMMAND_LONG param1..param7
    pub fn params(&self) -> [f32; 7] {
        match *self {
            VehicleCommand::ChangeAltitude {
                target_altitude,
                climb_rate,
            } => [climb_rate, 0.0, 0.0, 0.0, 0.0, 0.0, target_altitude],
            VehicleCommand::ConditionYaw {
                angle_deg,
                rate_deg_s,
                direction,
                relative,
            } => [
                angle_deg,
                rate_deg_s,
                direction.as_param(),
                if relative { 1.0 } else { 0.0 },
                0.0,
                0.0,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_altitude_params() {
        let cmd = VehicleCommand::ChangeAltitude {
            target_altitude: 5.0,
            climb_rate: 1.0,
        };
        assert_eq!(cmd.command_id(), 113);
        assert_eq!(cmd.params(), [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_condition_yaw_params() {
        let cmd = VehicleCommand::ConditionYaw {
            angle_deg: -30.0,
            rate_deg_s: 5.0,
            direction: YawDirection::CounterClockwise,
            relative: true,
        };
        assert_eq!(cmd.command_id(), 115);
        assert_eq!(cmd.params(), [-30.0, 5.0, -1.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_direction_from_diff() {
        assert_eq!(YawDirection::from_diff_deg(0.0), YawDirection::Clockwise);
        assert_eq!(YawDirection::from_diff_deg(12.5), YawDirection::Clockwise);
        assert_eq!(
            YawDirection::from_diff_deg(-0.01),
            YawDirection::CounterClockwise
        );
    }
}
