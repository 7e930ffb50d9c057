//! waypoint_pilot_core - Pure no_std logic for the waypoint_pilot command pipeline
//!
//! This crate holds the decisions the pipeline makes, separated from the
//! threads, sockets and clocks that drive them. Everything here can be tested
//! on the host with plain numbers.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Time is injected via [`traits::TimeSource`]
//!
//! # Modules
//!
//! - [`telemetry`]: Partial reports, fused snapshots, and the fusion attempt state machine
//! - [`decision`]: Priority navigation policy and running velocity average
//! - [`heartbeat`]: Two-state link connectivity tracker with miss hysteresis
//! - [`link`]: Typed inbound messages and outbound vehicle commands
//! - [`navigation`]: Target position and angle utilities
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)

#![no_std]

pub mod decision;
pub mod heartbeat;
pub mod link;
pub mod navigation;
pub mod telemetry;
pub mod traits;
