//! Cooperative exit and pause control
//!
//! One controller is shared by every worker through an `Arc`. Both flags are
//! plain atomics, so reads and writes never block.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Sleep step while paused or waiting
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Process-wide worker control flags.
///
/// `exit_requested` only ever goes from `false` to `true`. `paused` can be
/// toggled any number of times.
#[derive(Debug, Default)]
pub struct LifecycleController {
    exit_requested: AtomicBool,
    paused: AtomicBool,
}

impl LifecycleController {
    pub const fn new() -> Self {
        Self {
            exit_requested: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        }
    }

    /// Ask every worker to finish its current iteration and return.
    pub fn request_exit(&self) {
        self.exit_requested.store(true, Ordering::Release);
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::Acquire)
    }

    pub fn request_pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn request_resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Block while paused.
    ///
    /// Returns `false` when exit has been requested, in which case the
    /// caller should leave its loop.
    pub fn check_pause(&self) -> bool {
        while self.is_paused() && !self.is_exit_requested() {
            thread::sleep(PAUSE_POLL_INTERVAL);
        }
        !self.is_exit_requested()
    }

    /// Sleep for `duration` in short steps, waking early on exit.
    ///
    /// Returns `false` when exit was requested before the full duration passed.
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_exit_requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(PAUSE_POLL_INTERVAL));
        }
    }
}
