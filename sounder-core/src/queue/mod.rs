//! Fixed-capacity FIFO queues
//!
//! Both queues in the keyer are ring buffers whose capacity is a const
//! generic. They never allocate and never grow: a push onto a full queue
//! fails and hands the item back to the caller.

use heapless::Deque;

use crate::code::{SignalEvent, MAX_EVENTS_PER_CHAR};

/// Reference input buffering (characters awaiting encoding)
pub const INPUT_QUEUE_CAPACITY: usize = 1536;

/// Pending-event capacity: exactly one worst-case character
pub const PENDING_QUEUE_CAPACITY: usize = MAX_EVENTS_PER_CHAR;

/// Raw characters awaiting encoding
pub type InputQueue<const N: usize = INPUT_QUEUE_CAPACITY> = BoundedQueue<u8, N>;

/// Level changes awaiting their fire time
pub type PendingQueue = BoundedQueue<SignalEvent, PENDING_QUEUE_CAPACITY>;

/// Bounded FIFO backed by a ring buffer
#[derive(Debug)]
pub struct BoundedQueue<T, const N: usize> {
    items: Deque<T, N>,
}

impl<T, const N: usize> BoundedQueue<T, N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append an item at the back
    ///
    /// Returns the item back if the queue is full.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        self.items.push_back(item)
    }

    /// Remove and return the item at the front
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Observe the item at the front without removing it
    pub fn peek_front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if a push would fail
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Free slots
    pub fn remaining(&self) -> usize {
        N - self.items.len()
    }

    /// Drop everything queued
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate front to back
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
