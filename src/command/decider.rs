//! Command decider
//!
//! Wraps the core [`DecisionPolicy`] with logging and dispatch over the link.

use waypoint_pilot_core::decision::{DecisionParams, DecisionPolicy};
use waypoint_pilot_core::navigation::Position;
use waypoint_pilot_core::telemetry::TelemetrySnapshot;

use crate::communication::{LinkError, SharedLink};
use crate::error::PilotError;
use crate::{log_debug, log_info};

/// Turns snapshots into at most one dispatched command each
pub struct CommandDecider {
    policy: DecisionPolicy,
    link: SharedLink,
}

impl CommandDecider {
    pub fn new(
        link: SharedLink,
        target: Position,
        params: DecisionParams,
    ) -> Result<Self, PilotError> {
        let policy = DecisionPolicy::new(target, params)?;
        Ok(Self { policy, link })
    }

    pub fn target(&self) -> &Position {
        self.policy.target()
    }

    /// Snapshots evaluated so far
    pub fn samples(&self) -> u32 {
        self.policy.samples()
    }

    /// Evaluate one snapshot and dispatch the resulting command.
    ///
    /// Returns the action description, or `None` when the vehicle is within
    /// tolerance. A dispatch failure is returned as is; nothing is retried.
    pub fn run(&mut self, snapshot: &TelemetrySnapshot) -> Result<Option<String>, LinkError> {
        let evaluation = self.policy.evaluate(snapshot);
        let mean = evaluation.average;
        log_info!(
            "Average velocity: ({:.3}, {:.3}, {:.3}) m/s over {} samples",
            mean.x,
            mean.y,
            mean.z,
            self.policy.samples()
        );

        let Some(action) = evaluation.action else {
            log_debug!("Within tolerance, no action");
            return Ok(None);
        };

        self.link.send_command(action.command())?;
        let description = action.to_string();
        log_info!("{}", description);
        Ok(Some(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::mock::MockLink;
    use std::sync::Arc;
    use waypoint_pilot_core::link::{VehicleCommand, YawDirection};

    fn snapshot(x: f32, y: f32, z: f32, yaw: f32) -> TelemetrySnapshot {
        TelemetrySnapshot {
            time_boot_ms: Some(0),
            x: Some(x),
            y: Some(y),
            z: Some(z),
            yaw: Some(yaw),
            ..TelemetrySnapshot::default()
        }
    }

    fn decider(link: Arc<MockLink>) -> CommandDecider {
        CommandDecider::new(link, Position::new(10.0, 0.0, 5.0), DecisionParams::default())
            .unwrap()
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = DecisionParams {
            angle_tolerance_rad: 0.0,
            ..DecisionParams::default()
        };
        let result = CommandDecider::new(Arc::new(MockLink::new()), Position::default(), params);
        assert!(matches!(result, Err(PilotError::DecisionParams(_))));
    }

    #[test]
    fn test_altitude_then_no_action() {
        let link = Arc::new(MockLink::new());
        let mut decider = decider(link.clone());

        let first = decider.run(&snapshot(0.0, 0.0, 3.0, 0.0)).unwrap();
        assert_eq!(first.as_deref(), Some("CHANGE ALTITUDE: +2.00"));
        assert_eq!(
            link.sent_commands(),
            vec![VehicleCommand::ChangeAltitude {
                target_altitude: 5.0,
                climb_rate: 1.0,
            }]
        );

        let second = decider.run(&snapshot(0.0, 0.0, 5.0, 0.0)).unwrap();
        assert_eq!(second, None);
        assert_eq!(link.sent_commands().len(), 1);
        assert_eq!(decider.samples(), 2);
    }

    #[test]
    fn test_yaw_command_dispatched() {
        let link = Arc::new(MockLink::new());
        let mut decider = decider(link.clone());

        // Target bearing is 0; heading 90 degrees left of it
        let report = decider
            .run(&snapshot(0.0, 0.0, 5.0, std::f32::consts::FRAC_PI_2))
            .unwrap();
        assert_eq!(report.as_deref(), Some("CHANGE YAW: -90.00"));

        let sent = link.sent_commands();
        let VehicleCommand::ConditionYaw {
            direction,
            relative,
            ..
        } = sent[0]
        else {
            panic!("expected a yaw command");
        };
        assert_eq!(direction, YawDirection::CounterClockwise);
        assert!(relative);
    }

    #[test]
    fn test_dispatch_failure_propagates() {
        let link = Arc::new(MockLink::new());
        link.set_send_failure(true);
        let mut decider = decider(link.clone());

        let result = decider.run(&snapshot(0.0, 0.0, 0.0, 0.0));
        assert!(matches!(result, Err(LinkError::Closed)));
        assert!(link.sent_commands().is_empty());
    }
}
