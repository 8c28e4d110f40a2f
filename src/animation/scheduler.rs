use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap};

use crate::foundation::error::{BurstError, BurstResult};

/// Handle for a scheduled event, usable for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

#[derive(Debug)]
struct Entry<E> {
    at: f64,
    id: EventId,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .total_cmp(&other.at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Time-ordered queue of `(fire_at, event)` pairs driving every timeline in a run.
///
/// Determinism rule: events sharing a timestamp are delivered in the order they were scheduled.
/// Each event is delivered at most once; cancelled events are dropped when they reach the head.
#[derive(Debug)]
pub struct Scheduler<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    pending: BTreeSet<EventId>,
    cancelled: BTreeSet<EventId>,
    next_id: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: BTreeSet::new(),
            cancelled: BTreeSet::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, at: f64, event: E) -> BurstResult<EventId> {
        if !at.is_finite() {
            return Err(BurstError::validation(format!(
                "event time must be finite, got {at}"
            )));
        }
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id);
        self.heap.push(Reverse(Entry { at, id, event }));
        Ok(id)
    }

    /// Mark a pending event as consumed. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: EventId) -> bool {
        if !self.pending.remove(&id) {
            return false;
        }
        self.cancelled.insert(id)
    }

    /// Timestamp of the earliest live event.
    pub fn next_due(&mut self) -> Option<f64> {
        self.drop_cancelled_head();
        self.heap.peek().map(|Reverse(e)| e.at)
    }

    /// Pop the earliest live event if it fires at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, E)> {
        self.drop_cancelled_head();
        let head = self.heap.peek()?;
        if head.0.at > now {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        self.pending.remove(&entry.id);
        Some((entry.at, entry.event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
        self.cancelled.clear();
    }

    fn drop_cancelled_head(&mut self) {
        while let Some(Reverse(head)) = self.heap.peek() {
            if !self.cancelled.remove(&head.id) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
