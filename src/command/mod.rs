//! Navigation commands: snapshots in, vehicle commands and reports out

mod decider;
mod worker;

pub use decider::CommandDecider;
pub use worker::command_worker;
