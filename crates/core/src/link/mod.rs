//! Typed vehicle link messages
//!
//! The runtime decodes wire frames exactly once, at the link boundary, into
//! [`LinkMessage`]. Outbound traffic leaves the pipeline as a
//! [`VehicleCommand`] and is encoded by the link.

mod command;
mod message;

pub use command::{
    VehicleCommand, YawDirection, MAV_CMD_CONDITION_CHANGE_ALT, MAV_CMD_CONDITION_YAW,
};
pub use message::{LinkMessage, MessageKind};
