//! Navigation types and utilities
//!
//! - `Position`: Fixed target position in the local frame
//! - `heading`: Bearing and angle normalization helpers

pub mod heading;
mod types;

pub use heading::{bearing_to, normalize_pi};
pub use types::Position;
