//! Ground-side pilot for a single MAVLink vehicle.
//!
//! Listens for the vehicle over UDP, drives it toward a target position and
//! prints every command it issues.
//!
//! Usage:
//!   waypoint_pilot [--config FILE] [--bind ADDR] [--peer ADDR]
//!                  [--duration SECS] [--target X,Y,Z] [--log-dir DIR] [--verbose]

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use waypoint_pilot::communication::mavlink::UdpMavlinkLink;
use waypoint_pilot::config::TargetConfig;
use waypoint_pilot::core::logging;
use waypoint_pilot::{log_error, log_info, Orchestrator, PilotConfig, PilotError};

#[derive(Debug, Parser)]
#[command(name = "waypoint_pilot", version, about = "Drive a MAVLink vehicle toward a target position")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local UDP address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// Vehicle UDP address (learned from the first datagram when omitted)
    #[arg(long)]
    peer: Option<String>,

    /// Stop after this many seconds
    #[arg(short, long)]
    duration: Option<u64>,

    /// Target position in local NED metres
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_target)]
    target: Option<TargetConfig>,

    /// Also write logs to a file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_target(s: &str) -> Result<TargetConfig, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(TargetConfig { x, y, z }),
        _ => Err(format!("expected X,Y,Z, got {} values", parts.len())),
    }
}

fn load_config(args: &Args) -> Result<PilotConfig, PilotError> {
    let mut config = match &args.config {
        Some(path) => PilotConfig::load(path)?,
        None => PilotConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.link.bind = bind.clone();
    }
    if let Some(peer) = &args.peer {
        config.link.peer = Some(peer.clone());
    }
    if let Some(duration) = args.duration {
        config.run.duration_secs = Some(duration);
    }
    if let Some(target) = args.target {
        config.target = target;
    }
    if let Some(dir) = &args.log_dir {
        config.logging.directory = Some(dir.clone());
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

fn run(config: &PilotConfig) -> Result<(), PilotError> {
    let link = Arc::new(UdpMavlinkLink::open(&config.link)?);
    let orchestrator = Orchestrator::start(config, link.clone())?;

    let duration = config
        .run
        .duration_secs
        .map_or(Duration::MAX, Duration::from_secs);
    orchestrator.run_for(duration, |report| println!("{report}"));

    let summary = orchestrator.shutdown();
    for report in &summary.remaining_reports {
        println!("{report}");
    }
    log_info!("Link statistics: {:?}", link.stats());
    if !summary.panicked.is_empty() {
        log_error!("Workers panicked: {:?}", summary.panicked);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    log_info!(
        "Target ({:.2}, {:.2}, {:.2}), link {}",
        config.target.x,
        config.target.y,
        config.target.z,
        config.link.bind
    );

    if let Err(e) = run(&config) {
        log_error!("{}", e);
        drop(guard);
        process::exit(1);
    }
}
