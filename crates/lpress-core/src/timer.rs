#![forbid(unsafe_code)]

//! Deterministic cancellable timers and the two-stage arming cascade.
//!
//! [`TimerQueue`] is a host-driven scheduler: nothing fires until the host
//! calls [`TimerQueue::pop_due`] with the current time. A [`TimerHandle`] is
//! unique for the queue's lifetime, so a handle that already fired or was
//! cancelled can never alias a later timer.
//!
//! [`ArmingTimers`] owns the commit and hold slots. Each slot holds at most
//! one live handle and is cleared with `take()` before any state transition
//! that follows a fire or a cancel.
//!
//! # Invariants
//!
//! 1. Due timers pop in deadline order; equal deadlines pop in scheduling order.
//! 2. A handle leaves the queue exactly once (fired or cancelled).
//! 3. `ArmingTimers` never holds a handle the queue no longer knows about.

use web_time::{Duration, Instant};

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Short delay before the hold timer is armed.
    Commit,
    /// Stationary hold that fires the long press.
    Hold,
    /// Clears the scrolling flag after an interaction ends or is cancelled.
    ScrollReset,
    /// Clears the scrolling flag after the page stops scrolling.
    ScrollSettle,
}

/// Opaque, copyable handle to one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    #[inline]
    #[must_use]
    pub const fn kind(self) -> TimerKind {
        self.kind
    }
}

/// A timer that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    /// The scheduled deadline, which may be earlier than the `now` passed to
    /// [`TimerQueue::pop_due`].
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TimerHandle,
    deadline: Instant,
}

/// Host-driven timer queue.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(4),
            next_id: 1,
        }
    }

    /// Schedule a timer to fire `delay` after `now`.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TimerHandle {
        let handle = TimerHandle {
            id: self.next_id.max(1),
            kind,
        };
        self.next_id = handle.id + 1;
        self.entries.push(Entry {
            handle,
            deadline: saturating_deadline(now, delay),
        });
        handle
    }

    /// Cancel a live timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Remove and return the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<FiredTimer> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.handle.id))
            .map(|(index, _)| index)?;
        let entry = self.entries.remove(index);
        Some(FiredTimer {
            handle: entry.handle,
            deadline: entry.deadline,
        })
    }

    /// Drop every pending timer, returning how many were live.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live timers of `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: TimerKind) -> usize {
        self.entries.iter().filter(|e| e.handle.kind == kind).count()
    }
}

/// Cancel whatever `slot` holds and leave it empty.
///
/// Returns `true` if a live timer was cancelled.
pub fn disarm_slot(queue: &mut TimerQueue, slot: &mut Option<TimerHandle>) -> bool {
    slot.take().is_some_and(|handle| queue.cancel(handle))
}

/// `now + delay`, clamped to the latest representable instant.
fn saturating_deadline(now: Instant, mut delay: Duration) -> Instant {
    loop {
        if let Some(deadline) = now.checked_add(delay) {
            return deadline;
        }
        delay /= 2;
    }
}

/// Claim a fired timer for `slot`.
///
/// Returns `true` and empties the slot when `fired` is the handle it holds.
pub fn claim_slot(slot: &mut Option<TimerHandle>, fired: TimerHandle) -> bool {
    if *slot == Some(fired) {
        *slot = None;
        true
    } else {
        false
    }
}

/// The commit → hold cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArmingTimers {
    commit: Option<TimerHandle>,
    hold: Option<TimerHandle>,
}

impl ArmingTimers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commit: None,
            hold: None,
        }
    }

    /// Arm the commit timer, replacing any live commit or hold timer.
    pub fn arm_commit(&mut self, queue: &mut TimerQueue, now: Instant, delay: Duration) {
        self.disarm(queue);
        self.commit = Some(queue.schedule(TimerKind::Commit, now, delay));
    }

    /// Arm the hold timer, replacing any live hold timer.
    pub fn arm_hold(&mut self, queue: &mut TimerQueue, now: Instant, delay: Duration) {
        disarm_slot(queue, &mut self.hold);
        self.hold = Some(queue.schedule(TimerKind::Hold, now, delay));
    }

    /// Whether `fired` is the live commit timer; clears the slot if so.
    pub fn accept_commit(&mut self, fired: TimerHandle) -> bool {
        claim_slot(&mut self.commit, fired)
    }

    /// Whether `fired` is the live hold timer; clears the slot if so.
    pub fn accept_hold(&mut self, fired: TimerHandle) -> bool {
        claim_slot(&mut self.hold, fired)
    }

    /// Cancel both stages. Returns how many live timers were cancelled.
    pub fn disarm(&mut self, queue: &mut TimerQueue) -> usize {
        usize::from(disarm_slot(queue, &mut self.commit))
            + usize::from(disarm_slot(queue, &mut self.hold))
    }

    #[inline]
    #[must_use]
    pub const fn commit_armed(&self) -> bool {
        self.commit.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn hold_armed(&self) -> bool {
        self.hold.is_some()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        usize::from(self.commit.is_some()) + usize::from(self.hold.is_some())
    }
}
