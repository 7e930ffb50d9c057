//! Runtime primitives shared by every worker
//!
//! - [`logging`]: `log_*!` macros and subscriber setup
//! - [`lifecycle`]: cooperative exit/pause flags
//! - [`queue`]: non-blocking bounded FIFO between workers
//! - [`time`]: monotonic clock implementing the core `TimeSource`

pub mod lifecycle;
pub mod logging;
pub mod queue;
pub mod time;

pub use lifecycle::LifecycleController;
pub use queue::{BoundedQueue, QueueError};
pub use time::MonotonicTime;
