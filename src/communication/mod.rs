//! Vehicle link
//!
//! [`VehicleLink`] is the boundary between the pipeline and the vehicle:
//! decoded messages come in by kind, typed commands go out. Two
//! implementations ship with the crate:
//!
//! - [`mavlink::UdpMavlinkLink`]: MAVLink over UDP
//! - [`mock::MockLink`]: scripted in-memory link for tests and dry runs

mod link;
pub mod mavlink;
pub mod mock;

pub use link::{LinkError, SharedLink, VehicleLink};
