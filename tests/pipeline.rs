//! End-to-end pipeline runs against the scripted link

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use waypoint_pilot::communication::mock::MockLink;
use waypoint_pilot::config::TargetConfig;
use waypoint_pilot::{Orchestrator, PilotConfig};
use waypoint_pilot_core::link::VehicleCommand;
use waypoint_pilot_core::telemetry::{AttitudeReport, PositionReport};

fn test_config() -> PilotConfig {
    let mut config = PilotConfig::default();
    config.target = TargetConfig {
        x: 10.0,
        y: 0.0,
        z: 5.0,
    };
    config.fusion.budget_ms = 200;
    config.fusion.poll_interval_ms = 5;
    config.heartbeat.poll_timeout_ms = 50;
    config.heartbeat.send_period_ms = 50;
    config
}

fn push_state(link: &MockLink, time_boot_ms: u32, z: f32) {
    link.push_position(PositionReport {
        time_boot_ms,
        z,
        ..PositionReport::default()
    });
    link.push_attitude(AttitudeReport {
        time_boot_ms,
        ..AttitudeReport::default()
    });
}

/// Poll `orchestrator` for reports until `count` arrived or `timeout` passed.
fn collect_reports(orchestrator: &Orchestrator, count: usize, timeout: Duration) -> Vec<String> {
    let deadline = Instant::now() + timeout;
    let mut reports = Vec::new();
    while reports.len() < count && Instant::now() < deadline {
        reports.extend(orchestrator.drain_reports());
        thread::sleep(Duration::from_millis(10));
    }
    reports
}

#[test]
fn test_altitude_correction_then_hold() {
    let link = Arc::new(MockLink::new());
    push_state(&link, 100, 3.0);

    let orchestrator = Orchestrator::start(&test_config(), link.clone()).unwrap();
    let reports = collect_reports(&orchestrator, 1, Duration::from_secs(2));
    assert_eq!(reports, vec!["CHANGE ALTITUDE: +2.00".to_string()]);

    // At target altitude, heading straight at the target: no further action
    push_state(&link, 200, 5.0);
    thread::sleep(Duration::from_millis(300));

    let summary = orchestrator.shutdown();
    assert!(summary.panicked.is_empty());
    assert_eq!(summary.stopped.len(), 4);
    assert!(summary.remaining_reports.is_empty());
    assert_eq!(
        link.sent_commands(),
        vec![VehicleCommand::ChangeAltitude {
            target_altitude: 5.0,
            climb_rate: 1.0,
        }]
    );
    assert!(link.heartbeats_sent() >= 1);
}

#[test]
fn test_shutdown_is_prompt() {
    let link = Arc::new(MockLink::new());
    let orchestrator = Orchestrator::start(&test_config(), link).unwrap();
    thread::sleep(Duration::from_millis(100));

    let start = Instant::now();
    let summary = orchestrator.shutdown();
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(summary.stopped.len(), 4);
}

#[test]
fn test_pause_holds_commands_until_resume() {
    let link = Arc::new(MockLink::new());
    let orchestrator = Orchestrator::start(&test_config(), link.clone()).unwrap();

    orchestrator.pause();
    // Let any in-flight fusion attempt expire so every worker is parked
    thread::sleep(Duration::from_millis(300));
    push_state(&link, 100, 0.0);
    thread::sleep(Duration::from_millis(200));
    assert!(link.sent_commands().is_empty());
    assert!(orchestrator.drain_reports().is_empty());

    orchestrator.resume();
    let reports = collect_reports(&orchestrator, 1, Duration::from_secs(2));
    assert_eq!(reports, vec!["CHANGE ALTITUDE: +5.00".to_string()]);

    orchestrator.shutdown();
}

#[test]
fn test_exit_while_paused() {
    let link = Arc::new(MockLink::new());
    let orchestrator = Orchestrator::start(&test_config(), link).unwrap();
    orchestrator.pause();
    thread::sleep(Duration::from_millis(300));

    let start = Instant::now();
    let summary = orchestrator.shutdown();
    assert!(start.elapsed() < Duration::from_millis(500));
    assert!(summary.panicked.is_empty());
}

#[test]
fn test_run_for_delivers_reports() {
    let link = Arc::new(MockLink::new());
    push_state(&link, 100, 4.0);
    let orchestrator = Orchestrator::start(&test_config(), link).unwrap();

    let mut reports = Vec::new();
    orchestrator.run_for(Duration::from_millis(500), |r| reports.push(r));
    orchestrator.shutdown();

    assert_eq!(reports, vec!["CHANGE ALTITUDE: +1.00".to_string()]);
}
