//! Navigation decision policy
//!
//! Turns one fused snapshot into at most one corrective action. Altitude is
//! corrected before heading; a cycle that corrects altitude never also
//! corrects yaw.

mod average;
mod policy;

pub use average::{VelocityAverage, VelocityMean};
pub use policy::{Action, DecisionParams, DecisionPolicy, Evaluation, ParamsError};
