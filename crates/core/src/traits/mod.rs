//! Core traits for platform-agnostic pipeline logic.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - The std clock implementation lives in the runtime crate

pub mod time;

pub use time::{MockTime, TimeSource};
