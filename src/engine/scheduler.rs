//! Deterministic task scheduling on a virtual clock.
//!
//! Every time-driven behavior in a round - the preview end, the per-second
//! countdown tick, the mismatch flip-back - is a [`TaskKind`] scheduled with
//! [`TaskScheduler::schedule_after`]. The host drives time forward and the
//! scheduler hands back due tasks one at a time, so callbacks never overlap
//! and every ordering is reproducible in tests without sleeping.
//!
//! ## Cancellation
//!
//! Tasks are stamped with a generation counter. [`TaskScheduler::cancel_all`]
//! bumps the generation, invalidating the whole outstanding group at once:
//! a stale tick from a finished round can never reach a rebuilt deck.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// The time-driven work a session schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Flip all cards back down and open play.
    PreviewEnd,
    /// Decrement the countdown by one second.
    Tick,
    /// Hide a mismatched pair together and free the selection.
    FlipBack { first: usize, second: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    due_ms: u64,
    /// FIFO tie-break for tasks due at the same instant.
    seq: u64,
    generation: u64,
    kind: TaskKind,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual-clock timer queue owned by a session.
#[derive(Debug, Default)]
pub struct TaskScheduler {
    now_ms: u64,
    generation: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl TaskScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `kind` to run `delay_ms` after the current virtual time.
    pub fn schedule_after(&mut self, delay_ms: u64, kind: TaskKind) {
        let entry = Entry {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            generation: self.generation,
            kind,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Invalidate every outstanding task as a group.
    ///
    /// Stale entries are dropped lazily on pop; nothing scheduled before
    /// this call will ever be returned again.
    pub fn cancel_all(&mut self) {
        self.generation += 1;
    }

    /// Pop the next live task due at or before `deadline_ms`, advancing the
    /// virtual clock to its due time.
    ///
    /// Returns `None` once nothing (live) is due within the deadline. The
    /// clock is left where the last returned task ran, so tasks scheduled
    /// while handling it are relative to that instant.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TaskKind> {
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.due_ms > deadline_ms {
                return None;
            }
            let Reverse(entry) = self.queue.pop().unwrap_or_else(|| unreachable!());
            if entry.generation != self.generation {
                continue; // cancelled group
            }
            self.now_ms = self.now_ms.max(entry.due_ms);
            return Some(entry.kind);
        }
        None
    }

    /// Move the clock to `target_ms` after a drain pass.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Milliseconds until the next live task, if any.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.queue
            .iter()
            .filter(|Reverse(entry)| entry.generation == self.generation)
            .map(|Reverse(entry)| entry.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Number of live (non-cancelled) tasks outstanding.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(entry)| entry.generation == self.generation)
            .count()
    }
}
