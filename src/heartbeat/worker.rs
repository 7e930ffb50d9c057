//! Heartbeat worker loops

use std::sync::Arc;
use std::time::Duration;

use super::{HeartbeatMonitor, HeartbeatSender};
use crate::communication::SharedLink;
use crate::config::HeartbeatConfig;
use crate::core::LifecycleController;
use crate::{log_debug, log_error, log_info, log_warn};

/// Send a heartbeat every `period` until exit is requested.
pub fn heartbeat_sender_worker(
    link: SharedLink,
    controller: Arc<LifecycleController>,
    period: Duration,
) {
    let span = tracing::info_span!("heartbeat_sender");
    let _enter = span.enter();

    let mut sender = HeartbeatSender::new(link);
    log_info!("Heartbeat sender started (period {:?})", period);

    while !controller.is_exit_requested() {
        if !controller.check_pause() {
            break;
        }
        match sender.run() {
            Ok(()) => log_debug!("Heartbeat sent"),
            Err(e) => log_warn!("Failed to send heartbeat: {}", e),
        }
        if !controller.wait(period) {
            break;
        }
    }

    log_info!("Heartbeat sender stopped after {} heartbeats", sender.sent());
}

/// Poll inbound heartbeats and log connectivity until exit is requested.
pub fn heartbeat_receiver_worker(
    link: SharedLink,
    controller: Arc<LifecycleController>,
    settings: HeartbeatConfig,
) {
    let span = tracing::info_span!("heartbeat_receiver");
    let _enter = span.enter();

    let mut monitor =
        match HeartbeatMonitor::new(link, settings.poll_timeout(), settings.disconnect_threshold) {
            Ok(monitor) => monitor,
            Err(e) => {
                log_error!("Failed to create heartbeat monitor: {}", e);
                return;
            }
        };
    log_info!("Heartbeat receiver started");

    while !controller.is_exit_requested() {
        if !controller.check_pause() {
            break;
        }
        monitor.run();
    }

    log_info!("Heartbeat receiver stopped ({})", monitor.state().connectivity);
}
