//! Time abstraction for deadline-bounded operations.
//!
//! The fusion budget and the heartbeat poll window are expressed against a
//! `TimeSource`, so the runtime can use a monotonic clock while tests drive
//! time by hand.

use core::sync::atomic::{AtomicU64, Ordering};

/// Monotonic time source in microseconds since an arbitrary origin.
///
/// # Example
///
/// ```
/// use waypoint_pilot_core::traits::{MockTime, TimeSource};
///
/// fn budget_spent<T: TimeSource>(time: &T, started_us: u64, budget_us: u64) -> bool {
///     time.elapsed_since(started_us) >= budget_us
/// }
///
/// let time = MockTime::new();
/// assert!(!budget_spent(&time, 0, 1_000_000));
/// time.advance(1_000_000);
/// assert!(budget_spent(&time, 0, 1_000_000));
/// ```
pub trait TimeSource: Send + Sync {
    /// Returns current time in milliseconds.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns current time in microseconds.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the future reads as zero.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Hand-driven time source for tests.
///
/// Backed by an atomic so a test thread can advance time while a worker
/// thread reads it.
#[derive(Debug, Default)]
pub struct MockTime {
    current_us: AtomicU64,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub const fn new() -> Self {
        Self {
            current_us: AtomicU64::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub const fn with_initial(us: u64) -> Self {
        Self {
            current_us: AtomicU64::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.store(us, Ordering::SeqCst);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.fetch_add(us, Ordering::SeqCst);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.load(Ordering::SeqCst)
    }
}
