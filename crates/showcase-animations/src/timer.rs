//! Virtual-time timer queue
//!
//! Replaces the browser's `setTimeout`/`setInterval` with a deterministic
//! queue driven by an explicit clock. Nothing fires until the owner pops
//! due timers, so tests control time exactly.
//!
//! Timers fire in deadline order. Timers sharing a deadline fire in the
//! order they were armed; an interval re-armed after firing counts as newly
//! armed.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Handle to an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw id value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A timer that came due
#[derive(Debug)]
pub struct Fired<T> {
    /// Which timer fired
    pub id: TimerId,
    /// Virtual time it was due at
    pub deadline_ms: u64,
    /// The task it carried
    pub task: T,
}

#[derive(Debug)]
struct Armed<T> {
    id: TimerId,
    period_ms: Option<u64>,
    task: T,
}

/// Interval currently being executed by the owner
#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: TimerId,
    deadline_ms: u64,
    period_ms: u64,
    cancelled: bool,
}

type Key = (u64, u64);

/// Deterministic timeout/interval queue
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<Key, Armed<T>>,
    keys: HashMap<TimerId, Key>,
    in_flight: Option<InFlight>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue at time zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_seq: 0,
            queue: BTreeMap::new(),
            keys: HashMap::new(),
            in_flight: None,
        }
    }

    /// Current virtual time in milliseconds
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers (an executing interval is not counted)
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no timer is armed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether `id` is still armed
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Earliest armed deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Armed tasks in firing order
    pub fn tasks(&self) -> impl Iterator<Item = &T> {
        self.queue.values().map(|armed| &armed.task)
    }

    /// Arms a one-shot timer `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.allocate_id();
        self.insert(self.now_ms.saturating_add(delay_ms), id, None, task);
        id
    }

    /// Arms a repeating timer; a zero period is treated as one millisecond
    pub fn set_interval(&mut self, period_ms: u64, task: T) -> TimerId {
        let period_ms = period_ms.max(1);
        let id = self.allocate_id();
        self.insert(self.now_ms.saturating_add(period_ms), id, Some(period_ms), task);
        id
    }

    /// Cancels a timer. Cancelling the interval that is currently executing
    /// prevents it from being re-armed. Returns false for unknown or
    /// already-finished timers.
    pub fn clear(&mut self, id: TimerId) -> bool {
        if let Some(key) = self.keys.remove(&id) {
            self.queue.remove(&key);
            return true;
        }
        match self.in_flight.as_mut() {
            Some(flight) if flight.id == id && !flight.cancelled => {
                flight.cancelled = true;
                true
            }
            _ => false,
        }
    }

    /// Cancels a timer and hands back its task
    pub fn take(&mut self, id: TimerId) -> Option<T> {
        let key = self.keys.remove(&id)?;
        self.queue.remove(&key).map(|armed| armed.task)
    }

    /// Pops the earliest timer due at or before `limit_ms`, moving the clock
    /// to its deadline.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<Fired<T>> {
        let (&(deadline_ms, _), _) = self.queue.first_key_value()?;
        if deadline_ms > limit_ms {
            return None;
        }
        let ((deadline_ms, _), armed) = self.queue.pop_first()?;
        self.keys.remove(&armed.id);
        self.now_ms = self.now_ms.max(deadline_ms);
        self.in_flight = armed.period_ms.map(|period_ms| InFlight {
            id: armed.id,
            deadline_ms,
            period_ms,
            cancelled: false,
        });
        Some(Fired {
            id: armed.id,
            deadline_ms,
            task: armed.task,
        })
    }

    /// Re-arms the interval that was just popped, one period after its last
    /// deadline. Returns false (dropping `task`) if `id` is not the executing
    /// interval or it was cancelled while executing.
    pub fn rearm(&mut self, id: TimerId, task: T) -> bool {
        match self.in_flight.take() {
            Some(flight) if flight.id == id && !flight.cancelled => {
                let deadline = flight.deadline_ms.saturating_add(flight.period_ms);
                self.insert(deadline, id, Some(flight.period_ms), task);
                true
            }
            _ => false,
        }
    }

    /// Moves the clock forward to `time_ms` without firing anything
    pub fn advance_clock_to(&mut self, time_ms: u64) {
        self.now_ms = self.now_ms.max(time_ms);
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, deadline_ms: u64, id: TimerId, period_ms: Option<u64>, task: T) {
        let key = (deadline_ms, self.next_seq);
        self.next_seq += 1;
        self.keys.insert(id, key);
        self.queue.insert(key, Armed { id, period_ms, task });
    }
}
