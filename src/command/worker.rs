//! Command worker loop

use std::sync::Arc;
use std::thread;

use waypoint_pilot_core::decision::DecisionParams;
use waypoint_pilot_core::navigation::Position;
use waypoint_pilot_core::telemetry::TelemetrySnapshot;

use super::CommandDecider;
use crate::communication::SharedLink;
use crate::core::lifecycle::PAUSE_POLL_INTERVAL;
use crate::core::{BoundedQueue, LifecycleController};
use crate::{log_error, log_info, log_warn};

/// Decide on every queued snapshot until exit is requested.
///
/// Action descriptions go to `report_queue`. A failed dispatch is logged and
/// the worker moves on to the next snapshot.
pub fn command_worker(
    target: Position,
    params: DecisionParams,
    link: SharedLink,
    telemetry_queue: BoundedQueue<TelemetrySnapshot>,
    report_queue: BoundedQueue<String>,
    controller: Arc<LifecycleController>,
) {
    let span = tracing::info_span!("command");
    let _enter = span.enter();

    let mut decider = match CommandDecider::new(link, target, params) {
        Ok(decider) => decider,
        Err(e) => {
            log_error!("Failed to create command decider: {}", e);
            return;
        }
    };
    log_info!(
        "Command worker started (target {:.2}, {:.2}, {:.2})",
        target.x(),
        target.y(),
        target.z()
    );

    while !controller.is_exit_requested() {
        if !controller.check_pause() {
            break;
        }
        let Some(snapshot) = telemetry_queue.pop() else {
            thread::sleep(PAUSE_POLL_INTERVAL);
            continue;
        };
        match decider.run(&snapshot) {
            Ok(Some(report)) => {
                if report_queue.push(report).is_err() {
                    log_warn!("Report queue full, report dropped");
                }
            }
            Ok(None) => {}
            Err(e) => log_error!("Failed to dispatch command: {}", e),
        }
    }

    log_info!("Command worker stopped after {} snapshots", decider.samples());
}
