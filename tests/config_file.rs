//! Configuration files on disk

use std::io::Write;

use waypoint_pilot::config::ConfigError;
use waypoint_pilot::PilotConfig;

#[test]
fn test_load_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "link": {{ "bind": "127.0.0.1:14551", "peer": "127.0.0.1:14555" }},
            "target": {{ "x": 10.0, "y": 0.0, "z": 5.0 }},
            "decision": {{ "height_tolerance_m": 0.25 }},
            "heartbeat": {{ "disconnect_threshold": 3 }},
            "run": {{ "duration_secs": 30 }}
        }}"#
    )
    .unwrap();

    let config = PilotConfig::load(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.link.bind, "127.0.0.1:14551");
    assert_eq!(config.link.peer.as_deref(), Some("127.0.0.1:14555"));
    assert_eq!(config.link.system_id, 255);
    assert_eq!(config.decision.height_tolerance_m, 0.25);
    assert_eq!(config.decision.climb_rate_ms, 1.0);
    assert_eq!(config.heartbeat.disconnect_threshold, 3);
    assert_eq!(config.heartbeat.poll_timeout_ms, 1000);
    assert_eq!(config.run.duration_secs, Some(30));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PilotConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"fusion\": ").unwrap();
    let err = PilotConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_loaded_file_still_validated() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "queues": {{ "telemetry_capacity": 0 }} }}"#).unwrap();
    let config = PilotConfig::load(file.path()).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
