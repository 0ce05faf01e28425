use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Condvar, Mutex};

use crate::moves::Move;

/// An open-set entry. Duplicates by digest are expected: when a cheaper
/// path to a digest is found a fresh entry is pushed and the stale one is
/// filtered out by the closed-set check on pop.
#[derive(Debug, Clone, Copy)]
pub struct QueueItem {
    pub priority: u32,
    pub digest: u64,
    pub mov: Option<Move>,
}

impl QueueItem {
    pub fn new(priority: u32, digest: u64, mov: Option<Move>) -> Self {
        QueueItem { priority, digest, mov }
    }
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.digest == other.digest
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap, digest only to stay total
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.digest.cmp(&self.digest))
    }
}

#[derive(Debug)]
struct Inner {
    heap: BinaryHeap<QueueItem>,
    closed: bool,
    /// Items popped but not yet reported done; when this reaches zero with
    /// an empty heap the queue closes itself, which is how exhaustion of
    /// the search space terminates every blocked consumer.
    in_flight: usize,
}

/// Min-priority queue shared between workers: one mutex, one condvar.
#[derive(Debug)]
pub struct SharedQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

impl SharedQueue {
    pub fn new() -> Self {
        SharedQueue {
            inner: Mutex::new(Inner {
                heap: BinaryHeap::new(),
                closed: false,
                in_flight: 0,
            }),
            available: Condvar::new(),
        }
    }

    /// Silently discarded once the queue is closed.
    pub fn add(&self, item: QueueItem) {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return;
        }
        inner.heap.push(item);
        self.available.notify_one();
    }

    /// Blocks while the queue is empty but work is still in flight.
    /// Returns `None` only when the queue is closed (or closes itself on
    /// exhaustion) and empty.
    pub fn pop_min_blocking(&self) -> Option<QueueItem> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(item) = inner.heap.pop() {
                inner.in_flight += 1;
                return Some(item);
            }
            if inner.closed {
                return None;
            }
            if inner.in_flight == 0 {
                // empty, nothing pending anywhere: the space is exhausted
                inner.closed = true;
                self.available.notify_all();
                return None;
            }
            inner = self.available.wait(inner).unwrap();
        }
    }

    /// Returns `None` immediately when empty.
    pub fn pop_min_nonblocking(&self) -> Option<QueueItem> {
        let mut inner = self.inner.lock().unwrap();
        let item = inner.heap.pop();
        if item.is_some() {
            inner.in_flight += 1;
        }
        item
    }

    /// Marks one popped item fully processed (all successors added).
    pub fn task_done(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.heap.is_empty() && inner.in_flight == 0 && !inner.closed {
            inner.closed = true;
            self.available.notify_all();
        }
    }

    /// Closes the queue and wakes every blocked consumer.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().heap.is_empty()
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new()
    }
}
