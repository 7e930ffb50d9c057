//! Priority decision policy
//!
//! Evaluation order per snapshot:
//! 1. Running velocity average (always)
//! 2. Altitude correction when |target.z - z| exceeds the height tolerance
//! 3. Yaw correction toward the target bearing when the normalized heading
//!    error exceeds the angle tolerance
//! 4. Otherwise no action

use core::fmt;

use libm::fabsf;

use super::{VelocityAverage, VelocityMean};
use crate::link::{VehicleCommand, YawDirection};
use crate::navigation::{bearing_to, normalize_pi, Position};
use crate::telemetry::TelemetrySnapshot;

/// Tolerances and command rates for the policy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionParams {
    /// Acceptable altitude error (m)
    pub height_tolerance_m: f32,
    /// Acceptable heading error (rad)
    pub angle_tolerance_rad: f32,
    /// Climb/descent rate sent with altitude corrections (m/s)
    pub climb_rate_ms: f32,
    /// Angular speed sent with yaw corrections (deg/s)
    pub yaw_rate_deg_s: f32,
}

impl Default for DecisionParams {
    fn default() -> Self {
        Self {
            height_tolerance_m: 0.5,
            angle_tolerance_rad: 5.0_f32.to_radians(),
            climb_rate_ms: 1.0,
            yaw_rate_deg_s: 5.0,
        }
    }
}

/// Rejected policy parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamsError {
    HeightTolerance,
    AngleTolerance,
    ClimbRate,
    YawRate,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamsError::HeightTolerance => "height tolerance",
            ParamsError::AngleTolerance => "angle tolerance",
            ParamsError::ClimbRate => "climb rate",
            ParamsError::YawRate => "yaw rate",
        };
        write!(f, "{name} must be a positive finite number")
    }
}

impl DecisionParams {
    /// Check every value is positive and finite
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.height_tolerance_m) {
            return Err(ParamsError::HeightTolerance);
        }
        if !positive(self.angle_tolerance_rad) {
            return Err(ParamsError::AngleTolerance);
        }
        if !positive(self.climb_rate_ms) {
            return Err(ParamsError::ClimbRate);
        }
        if !positive(self.yaw_rate_deg_s) {
            return Err(ParamsError::YawRate);
        }
        Ok(())
    }
}

/// Corrective action chosen for one snapshot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Altitude correction; `delta_m` is target minus current
    ChangeAltitude {
        delta_m: f32,
        command: VehicleCommand,
    },
    /// Heading correction; `diff_deg` is the normalized bearing error
    ChangeYaw {
        diff_deg: f32,
        command: VehicleCommand,
    },
}

impl Action {
    /// Command to dispatch for this action
    pub fn command(&self) -> &VehicleCommand {
        match self {
            Action::ChangeAltitude { command, .. } | Action::ChangeYaw { command, .. } => command,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ChangeAltitude { delta_m, .. } => write!(f, "CHANGE ALTITUDE: {delta_m:+.2}"),
            Action::ChangeYaw { diff_deg, .. } => write!(f, "CHANGE YAW: {diff_deg:+.2}"),
        }
    }
}

/// Result of evaluating one snapshot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Running velocity mean including this snapshot
    pub average: VelocityMean,
    /// At most one corrective action
    pub action: Option<Action>,
}

/// Decision policy toward a fixed target.
///
/// Only the velocity accumulators change between calls.
#[derive(Clone, Debug)]
pub struct DecisionPolicy {
    target: Position,
    params: DecisionParams,
    average: VelocityAverage,
}

impl DecisionPolicy {
    /// Create a policy, rejecting non-positive tolerances or rates
    pub fn new(target: Position, params: DecisionParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            target,
            params,
            average: VelocityAverage::new(),
        })
    }

    pub fn target(&self) -> &Position {
        &self.target
    }

    pub fn params(&self) -> &DecisionParams {
        &self.params
    }

    /// Snapshots evaluated so far
    pub fn samples(&self) -> u32 {
        self.average.samples()
    }

    /// Evaluate one snapshot
    pub fn evaluate(&mut self, snapshot: &TelemetrySnapshot) -> Evaluation {
        let average = self.average.record(
            snapshot.x_velocity,
            snapshot.y_velocity,
            snapshot.z_velocity,
        );

        let action = self
            .altitude_action(snapshot)
            .or_else(|| self.yaw_action(snapshot));

        Evaluation { average, action }
    }

    fn altitude_action(&self, snapshot: &TelemetrySnapshot) -> Option<Action> {
        let z = finite(snapshot.z)?;
        let delta_m = self.target.z() - z;
        if fabsf(delta_m) <= self.params.height_tolerance_m {
            return None;
        }
        Some(Action::ChangeAltitude {
            delta_m,
            command: VehicleCommand::ChangeAltitude {
                target_altitude: self.target.z(),
                climb_rate: self.params.climb_rate_ms,
            },
        })
    }

    fn yaw_action(&self, snapshot: &TelemetrySnapshot) -> Option<Action> {
        let (yaw, x, y) = (
            finite(snapshot.yaw)?,
            finite(snapshot.x)?,
            finite(snapshot.y)?,
        );
        let diff = normalize_pi(bearing_to(x, y, &self.target) - yaw);
        if fabsf(diff) <= self.params.angle_tolerance_rad {
            return None;
        }
        let diff_deg = diff.to_degrees();
        Some(Action::ChangeYaw {
            diff_deg,
            command: VehicleCommand::ConditionYaw {
                angle_deg: diff_deg,
                rate_deg_s: self.params.yaw_rate_deg_s,
                direction: YawDirection::from_diff_deg(diff_deg),
                relative: true,
            },
        })
    }
}

/// NaN and infinities ("unknown" on the wire) count as absent
fn finite(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f32::consts::PI;
    use std::string::ToString;

    use super::*;

    fn policy(target: Position) -> DecisionPolicy {
        DecisionPolicy::new(target, DecisionParams::default()).unwrap()
    }

    fn snapshot(x: f32, y: f32, z: f32, yaw: f32) -> TelemetrySnapshot {
        TelemetrySnapshot {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            yaw: Some(yaw),
            ..TelemetrySnapshot::default()
        }
    }

    #[test]
    fn test_altitude_below_target_climbs() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        let evaluation = policy.evaluate(&snapshot(0.0, 0.0, 3.0, 0.0));

        let action = evaluation.action.expect("altitude action");
        assert_eq!(action.to_string(), "CHANGE ALTITUDE: +2.00");
        assert_eq!(
            *action.command(),
            VehicleCommand::ChangeAltitude {
                target_altitude: 5.0,
                climb_rate: 1.0
            }
        );
    }

    #[test]
    fn test_altitude_above_target_reports_negative_delta() {
        let mut policy = policy(Position::new(0.0, 0.0, 5.0));
        let action = policy
            .evaluate(&snapshot(0.0, 0.0, 8.25, 0.0))
            .action
            .unwrap();
        assert_eq!(action.to_string(), "CHANGE ALTITUDE: -3.25");
    }

    #[test]
    fn test_altitude_within_tolerance_is_ignored() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        assert!(policy
            .evaluate(&snapshot(0.0, 0.0, 5.4, 0.0))
            .action
            .is_none());
    }

    #[test]
    fn test_unknown_altitude_takes_no_action() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        let evaluation = policy.evaluate(&snapshot(0.0, 0.0, f32::NAN, 0.0));
        assert_eq!(evaluation.action, None);
        assert_eq!(policy.samples(), 1);
    }

    #[test]
    fn test_unknown_heading_takes_no_action() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        assert_eq!(
            policy.evaluate(&snapshot(0.0, 0.0, 5.0, f32::NAN)).action,
            None
        );
        assert_eq!(
            policy
                .evaluate(&snapshot(f32::INFINITY, 0.0, 5.0, PI))
                .action,
            None
        );
    }

    #[test]
    fn test_huge_heading_still_decides() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        let evaluation = policy.evaluate(&snapshot(0.0, 0.0, 5.0, 2.0e8));
        if let Some(Action::ChangeYaw { diff_deg, .. }) = evaluation.action {
            assert!(diff_deg > -180.0 && diff_deg <= 180.0);
        }
    }

    #[test]
    fn test_altitude_takes_priority_over_yaw() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        // Facing directly away from the target and 2 m low
        let evaluation = policy.evaluate(&snapshot(0.0, 0.0, 3.0, PI));

        assert!(matches!(
            evaluation.action,
            Some(Action::ChangeAltitude { .. })
        ));
    }

    #[test]
    fn test_yaw_correction_when_altitude_ok() {
        let mut policy = policy(Position::new(0.0, 10.0, 5.0));
        // Target due +y (bearing PI/2), facing +x
        let action = policy
            .evaluate(&snapshot(0.0, 0.0, 5.0, 0.0))
            .action
            .unwrap();

        match action {
            Action::ChangeYaw { diff_deg, command } => {
                assert!((diff_deg - 90.0).abs() < 1e-3);
                match command {
                    VehicleCommand::ConditionYaw {
                        angle_deg,
                        rate_deg_s,
                        direction,
                        relative,
                    } => {
                        assert!((angle_deg - 90.0).abs() < 1e-3);
                        assert_eq!(rate_deg_s, 5.0);
                        assert_eq!(direction, YawDirection::Clockwise);
                        assert!(relative);
                    }
                    other => panic!("Expected ConditionYaw, got {:?}", other),
                }
            }
            other => panic!("Expected ChangeYaw, got {:?}", other),
        }
        assert_eq!(action.to_string(), "CHANGE YAW: +90.00");
    }

    #[test]
    fn test_negative_yaw_error_turns_counter_clockwise() {
        let mut policy = policy(Position::new(0.0, -10.0, 5.0));
        let action = policy
            .evaluate(&snapshot(0.0, 0.0, 5.0, 0.0))
            .action
            .unwrap();
        match action.command() {
            VehicleCommand::ConditionYaw { direction, .. } => {
                assert_eq!(*direction, YawDirection::CounterClockwise)
            }
            other => panic!("Expected ConditionYaw, got {:?}", other),
        }
    }

    #[test]
    fn test_yaw_error_wraps_across_pi() {
        // Bearing PI - 0.05, yaw -PI + 0.05: raw diff 2PI - 0.1, normalized -0.1 rad
        let mut policy = policy(Position::new(-10.0, 0.5, 0.0));
        let bearing = bearing_to(0.0, 0.0, policy.target());
        let yaw = bearing - (2.0 * PI - 0.1);
        let action = policy
            .evaluate(&snapshot(0.0, 0.0, 0.0, yaw))
            .action
            .unwrap();
        match action {
            Action::ChangeYaw { diff_deg, .. } => {
                assert!((diff_deg - (-0.1_f32).to_degrees()).abs() < 1e-2)
            }
            other => panic!("Expected ChangeYaw, got {:?}", other),
        }
    }

    #[test]
    fn test_yaw_within_tolerance_is_no_action() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        let evaluation = policy.evaluate(&snapshot(0.0, 0.0, 5.0, 0.05));
        assert!(evaluation.action.is_none());
    }

    #[test]
    fn test_yaw_needs_position_and_heading() {
        let mut policy = policy(Position::new(0.0, 10.0, 5.0));
        let missing_x = TelemetrySnapshot {
            y: Some(0.0),
            yaw: Some(0.0),
            ..TelemetrySnapshot::default()
        };
        assert!(policy.evaluate(&missing_x).action.is_none());

        let missing_yaw = TelemetrySnapshot {
            x: Some(0.0),
            y: Some(0.0),
            ..TelemetrySnapshot::default()
        };
        assert!(policy.evaluate(&missing_yaw).action.is_none());
    }

    #[test]
    fn test_end_to_end_sequence() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));

        let first = policy.evaluate(&TelemetrySnapshot {
            z: Some(3.0),
            ..TelemetrySnapshot::default()
        });
        assert_eq!(first.action.unwrap().to_string(), "CHANGE ALTITUDE: +2.00");

        let second = policy.evaluate(&snapshot(0.0, 0.0, 5.0, 0.0));
        assert!(second.action.is_none());
        assert_eq!(policy.samples(), 2);
    }

    #[test]
    fn test_average_runs_on_every_evaluation() {
        let mut policy = policy(Position::new(10.0, 0.0, 5.0));
        let with_vx = |vx: Option<f32>, vy: Option<f32>| TelemetrySnapshot {
            x_velocity: vx,
            y_velocity: vy,
            ..TelemetrySnapshot::default()
        };
        policy.evaluate(&with_vx(Some(1.0), None));
        policy.evaluate(&with_vx(None, Some(2.0)));
        let evaluation = policy.evaluate(&with_vx(Some(3.0), None));

        assert!((evaluation.average.x - 4.0 / 3.0).abs() < 1e-6);
        assert!((evaluation.average.y - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = DecisionParams {
            height_tolerance_m: 0.0,
            ..DecisionParams::default()
        };
        assert_eq!(
            DecisionPolicy::new(Position::default(), params).unwrap_err(),
            ParamsError::HeightTolerance
        );

        let params = DecisionParams {
            angle_tolerance_rad: f32::NAN,
            ..DecisionParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::AngleTolerance));
    }
}
