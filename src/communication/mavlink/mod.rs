//! MAVLink (dialect `common`) implementation of the vehicle link

pub mod codec;
mod udp;

pub use udp::{LinkStats, UdpMavlinkLink};
