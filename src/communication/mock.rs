//! Scripted in-memory link
//!
//! Messages are queued per kind, optionally with a delay measured from the
//! moment they are queued. Everything sent is recorded for inspection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use waypoint_pilot_core::link::{LinkMessage, MessageKind, VehicleCommand};
use waypoint_pilot_core::telemetry::{AttitudeReport, PositionReport};

use super::{LinkError, VehicleLink};

const RECV_POLL_STEP: Duration = Duration::from_millis(1);

struct Scheduled {
    ready_at: Instant,
    message: LinkMessage,
}

/// Mock vehicle link for tests
#[derive(Default)]
pub struct MockLink {
    inbox: Mutex<[VecDeque<Scheduled>; 3]>,
    commands: Mutex<Vec<VehicleCommand>>,
    heartbeats_sent: AtomicUsize,
    fail_sends: AtomicBool,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `message` available immediately.
    pub fn push(&self, message: LinkMessage) {
        self.push_after(Duration::ZERO, message);
    }

    /// Make `message` available once `delay` has passed.
    pub fn push_after(&self, delay: Duration, message: LinkMessage) {
        let ready_at = Instant::now() + delay;
        self.lock_inbox()[message.kind().index()].push_back(Scheduled { ready_at, message });
    }

    pub fn push_position(&self, report: PositionReport) {
        self.push(LinkMessage::Position(report));
    }

    pub fn push_attitude(&self, report: AttitudeReport) {
        self.push(LinkMessage::Attitude(report));
    }

    /// Queue `count` heartbeats, available immediately.
    pub fn push_heartbeats(&self, count: usize) {
        for _ in 0..count {
            self.push(LinkMessage::Heartbeat);
        }
    }

    /// Messages of `kind` not yet received
    pub fn pending(&self, kind: MessageKind) -> usize {
        self.lock_inbox()[kind.index()].len()
    }

    /// Commands sent so far, oldest first
    pub fn sent_commands(&self) -> Vec<VehicleCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn heartbeats_sent(&self) -> usize {
        self.heartbeats_sent.load(Ordering::Relaxed)
    }

    /// Make every subsequent send fail with [`LinkError::Closed`].
    pub fn set_send_failure(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::Relaxed);
    }

    fn lock_inbox(&self) -> MutexGuard<'_, [VecDeque<Scheduled>; 3]> {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_ready(&self, kind: MessageKind) -> Option<LinkMessage> {
        let mut inbox = self.lock_inbox();
        let queue = &mut inbox[kind.index()];
        let ready = queue
            .front()
            .is_some_and(|next| next.ready_at <= Instant::now());
        if ready {
            queue.pop_front().map(|s| s.message)
        } else {
            None
        }
    }

    fn check_send(&self) -> Result<(), LinkError> {
        if self.fail_sends.load(Ordering::Relaxed) {
            Err(LinkError::Closed)
        } else {
            Ok(())
        }
    }
}

impl VehicleLink for MockLink {
    fn recv(
        &self,
        kind: MessageKind,
        timeout: Duration,
    ) -> Result<Option<LinkMessage>, LinkError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(message) = self.take_ready(kind) {
                return Ok(Some(message));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep((deadline - now).min(RECV_POLL_STEP));
        }
    }

    fn send_command(&self, command: &VehicleCommand) -> Result<(), LinkError> {
        self.check_send()?;
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*command);
        Ok(())
    }

    fn send_heartbeat(&self) -> Result<(), LinkError> {
        self.check_send()?;
        self.heartbeats_sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
