//! Telemetry worker loop

use std::sync::Arc;

use waypoint_pilot_core::telemetry::TelemetrySnapshot;

use super::TelemetryFuser;
use crate::communication::SharedLink;
use crate::config::FusionConfig;
use crate::core::{BoundedQueue, LifecycleController, QueueError};
use crate::{log_error, log_info, log_warn};

/// Fuse telemetry and queue every snapshot until exit is requested.
///
/// A fusion timeout is logged by the fuser and the next attempt starts
/// immediately. A full queue drops the snapshot.
pub fn telemetry_worker(
    settings: FusionConfig,
    link: SharedLink,
    telemetry_queue: BoundedQueue<TelemetrySnapshot>,
    controller: Arc<LifecycleController>,
) {
    let span = tracing::info_span!("telemetry");
    let _enter = span.enter();

    let fuser = match TelemetryFuser::new(link, settings.budget(), settings.poll_interval()) {
        Ok(fuser) => fuser,
        Err(e) => {
            log_error!("Failed to create telemetry fuser: {}", e);
            return;
        }
    };
    log_info!("Telemetry worker started (budget {:?})", fuser.budget());

    while !controller.is_exit_requested() {
        if !controller.check_pause() {
            break;
        }
        let Ok(snapshot) = fuser.run() else {
            continue;
        };
        match telemetry_queue.push(snapshot) {
            Ok(()) => {}
            Err(QueueError::Full(_)) => log_warn!("Telemetry queue full, snapshot dropped"),
            Err(QueueError::Disconnected(_)) => {
                log_error!("Telemetry queue disconnected");
                break;
            }
        }
    }

    log_info!("Telemetry worker stopped");
}
