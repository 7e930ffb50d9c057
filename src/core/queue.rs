//! Bounded FIFO between workers
//!
//! A thin wrapper over a `crossbeam-channel` bounded channel that keeps both
//! ends together. Every operation is non-blocking; consumers poll and back
//! off on their own.

use std::fmt;

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Default capacity for the telemetry and report queues
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Push rejected; the item is handed back to the caller
#[derive(thiserror::Error)]
pub enum QueueError<T> {
    #[error("queue is full")]
    Full(T),

    #[error("queue is disconnected")]
    Disconnected(T),
}

impl<T> QueueError<T> {
    /// Recover the item that could not be queued
    pub fn into_inner(self) -> T {
        match self {
            QueueError::Full(item) | QueueError::Disconnected(item) => item,
        }
    }
}

impl<T> fmt::Debug for QueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Full(_) => f.write_str("Full(..)"),
            QueueError::Disconnected(_) => f.write_str("Disconnected(..)"),
        }
    }
}

/// Bounded single-producer/single-consumer queue.
///
/// Cloning yields another handle to the same queue.
pub struct BoundedQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Append an item without blocking.
    pub fn push(&self, item: T) -> Result<(), QueueError<T>> {
        self.sender.try_send(item).map_err(|e| match e {
            TrySendError::Full(item) => QueueError::Full(item),
            TrySendError::Disconnected(item) => QueueError::Disconnected(item),
        })
    }

    /// Remove the oldest item, if any.
    pub fn pop(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every queued item in FIFO order.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T> Clone for BoundedQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
