//! Worker orchestration
//!
//! Creates the shared queues and controller, starts one named thread per
//! worker, and tears everything down cooperatively:
//!
//! ```text
//! link ─► telemetry ─► telemetry queue ─► command ─► report queue ─► caller
//! link ─► heartbeat_receiver
//! heartbeat_sender ─► link
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use waypoint_pilot_core::telemetry::TelemetrySnapshot;

use crate::command::command_worker;
use crate::communication::SharedLink;
use crate::config::PilotConfig;
use crate::core::lifecycle::PAUSE_POLL_INTERVAL;
use crate::core::{BoundedQueue, LifecycleController};
use crate::error::PilotError;
use crate::heartbeat::{heartbeat_receiver_worker, heartbeat_sender_worker};
use crate::telemetry::telemetry_worker;
use crate::{log_error, log_info};

struct Worker {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// How the workers ended
#[derive(Debug, Default)]
pub struct ShutdownReport {
    /// Workers that joined cleanly
    pub stopped: Vec<&'static str>,
    /// Workers whose thread panicked
    pub panicked: Vec<&'static str>,
    /// Reports still queued at shutdown
    pub remaining_reports: Vec<String>,
}

/// Running pipeline
pub struct Orchestrator {
    controller: Arc<LifecycleController>,
    telemetry_queue: BoundedQueue<TelemetrySnapshot>,
    report_queue: BoundedQueue<String>,
    workers: Vec<Worker>,
}

impl Orchestrator {
    /// Start every worker against `link`.
    ///
    /// If a thread cannot be spawned, the workers already running are stopped
    /// before the error is returned.
    pub fn start(config: &PilotConfig, link: SharedLink) -> Result<Self, PilotError> {
        let mut orchestrator = Self {
            controller: Arc::new(LifecycleController::new()),
            telemetry_queue: BoundedQueue::new(config.queues.telemetry_capacity),
            report_queue: BoundedQueue::new(config.queues.report_capacity),
            workers: Vec::with_capacity(4),
        };

        let result = orchestrator.spawn_all(config, &link);
        if let Err(e) = result {
            orchestrator.shutdown();
            return Err(e);
        }
        log_info!("Started {} workers", orchestrator.workers.len());
        Ok(orchestrator)
    }

    fn spawn_all(&mut self, config: &PilotConfig, link: &SharedLink) -> Result<(), PilotError> {
        {
            let (settings, link, queue, controller) = (
                config.fusion,
                Arc::clone(link),
                self.telemetry_queue.clone(),
                Arc::clone(&self.controller),
            );
            self.spawn("telemetry", move || {
                telemetry_worker(settings, link, queue, controller)
            })?;
        }
        {
            let (target, params) = (config.target.position(), config.decision.params());
            let (link, telemetry, reports, controller) = (
                Arc::clone(link),
                self.telemetry_queue.clone(),
                self.report_queue.clone(),
                Arc::clone(&self.controller),
            );
            self.spawn("command", move || {
                command_worker(target, params, link, telemetry, reports, controller)
            })?;
        }
        {
            let (link, controller, period) = (
                Arc::clone(link),
                Arc::clone(&self.controller),
                config.heartbeat.send_period(),
            );
            self.spawn("heartbeat_sender", move || {
                heartbeat_sender_worker(link, controller, period)
            })?;
        }
        {
            let (link, controller, settings) = (
                Arc::clone(link),
                Arc::clone(&self.controller),
                config.heartbeat,
            );
            self.spawn("heartbeat_receiver", move || {
                heartbeat_receiver_worker(link, controller, settings)
            })?;
        }
        Ok(())
    }

    fn spawn<F>(&mut self, name: &'static str, body: F) -> Result<(), PilotError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(body)
            .map_err(|source| PilotError::Spawn { name, source })?;
        self.workers.push(Worker { name, handle });
        Ok(())
    }

    pub fn pause(&self) {
        log_info!("Pausing workers");
        self.controller.request_pause();
    }

    pub fn resume(&self) {
        log_info!("Resuming workers");
        self.controller.request_resume();
    }

    /// Reports produced so far, oldest first
    pub fn drain_reports(&self) -> Vec<String> {
        self.report_queue.drain()
    }

    /// Hand every report to `sink` until `duration` has passed or exit is
    /// requested elsewhere, polling with the standard backoff. A duration too
    /// large to represent runs until exit.
    pub fn run_for<F>(&self, duration: Duration, mut sink: F)
    where
        F: FnMut(String),
    {
        let deadline = Instant::now().checked_add(duration);
        while deadline.map_or(true, |d| Instant::now() < d)
            && !self.controller.is_exit_requested()
        {
            match self.report_queue.pop() {
                Some(report) => sink(report),
                None => thread::sleep(PAUSE_POLL_INTERVAL),
            }
        }
    }

    /// Request exit and join every worker.
    pub fn shutdown(mut self) -> ShutdownReport {
        self.controller.request_exit();

        let mut report = ShutdownReport::default();
        for worker in self.workers.drain(..) {
            match worker.handle.join() {
                Ok(()) => report.stopped.push(worker.name),
                Err(_) => {
                    log_error!("Worker {} panicked", worker.name);
                    report.panicked.push(worker.name);
                }
            }
        }
        report.remaining_reports = self.report_queue.drain();
        log_info!(
            "Workers stopped ({} reports left unread)",
            report.remaining_reports.len()
        );
        report
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.controller.request_exit();
        for worker in self.workers.drain(..) {
            let _ = worker.handle.join();
        }
    }
}
