//! Delayed callbacks tagged with the epoch they were scheduled under
//!
//! Nothing is ever cancelled. A timer whose epoch no longer matches the
//! game's current epoch is dropped by the receiver when it fires.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Run one simulation step
    Tick,
    /// Serve a new ball
    RoundReset,
}

/// A scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub epoch: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due_ms: u64,
    /// Insertion order, so equal due times fire first-in first-out
    seq: u64,
    timer: Timer,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers ordered by due time
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `timer` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, timer: Timer) {
        let entry = Entry {
            due_ms: now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            timer,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    /// Pop the earliest timer due at or before `until_ms`
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, Timer)> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.due_ms <= until_ms => {
                let Reverse(entry) = self.heap.pop()?;
                Some((entry.due_ms, entry.timer))
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(epoch: u64, kind: TimerKind) -> Timer {
        Timer { epoch, kind }
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 30, timer(1, TimerKind::RoundReset));
        queue.schedule(0, 10, timer(1, TimerKind::Tick));
        queue.schedule(5, 10, timer(2, TimerKind::Tick));

        assert_eq!(queue.pop_due(100), Some((10, timer(1, TimerKind::Tick))));
        assert_eq!(queue.pop_due(100), Some((15, timer(2, TimerKind::Tick))));
        assert_eq!(queue.pop_due(100), Some((30, timer(1, TimerKind::RoundReset))));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 16, timer(0, TimerKind::Tick));
        assert_eq!(queue.pop_due(15), None);
        assert!(!queue.is_empty());
        assert!(queue.pop_due(16).is_some());
    }

    #[test]
    fn test_equal_due_is_fifo() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 5, timer(0, TimerKind::RoundReset));
        queue.schedule(0, 5, timer(0, TimerKind::Tick));
        assert_eq!(queue.pop_due(5).map(|(_, t)| t.kind), Some(TimerKind::RoundReset));
        assert_eq!(queue.pop_due(5).map(|(_, t)| t.kind), Some(TimerKind::Tick));
    }
}
