//! Injected scheduling capability and the single-threaded timer queue behind it.
//!
//! Components never create process-wide intervals. They ask a [`Scheduler`] for
//! a timer and hold the returned [`TimerGuard`]; dropping the guard cancels the
//! timer, so a component that goes away can never leave a callback behind.
//!
//! Fired timers are not callbacks. The [`EventLoop`] hands out [`TimerEvent`]s
//! one at a time and the owner routes each to the component whose timer id it
//! carries. A component that has already released that id simply ignores the
//! event, which is what makes cancellation win against an event that was
//! already dequeued.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::time_source::TimeSource;

/// Identifier of a scheduled timer. Never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What kind of timer to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires every period, first after one period
    Repeating(Duration),
    /// Fires once after the delay, then is gone
    Once(Duration),
}

impl TimerKind {
    fn delay(&self) -> Duration {
        match *self {
            TimerKind::Repeating(period) => period,
            TimerKind::Once(delay) => delay,
        }
    }
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub id: TimerId,
    /// Time at which the timer was due, which may be earlier than when it was dequeued
    pub fired_at: Duration,
}

/// Scheduling capability handed to components.
///
/// Methods take `&self`: a scheduler is shared by every component on the page
/// and mutates through interior mutability on a single thread.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler {
    /// Current time of the underlying clock
    fn now(&self) -> Duration;

    /// Schedule a timer relative to `now()`
    fn schedule(&self, kind: TimerKind) -> TimerId;

    /// Cancel a timer. Returns `false` if it was not scheduled.
    fn cancel(&self, id: TimerId) -> bool;

    /// Whether the timer is still pending
    fn is_scheduled(&self, id: TimerId) -> bool;
}

/// Scoped ownership of one scheduled timer.
///
/// The timer is cancelled when the guard is dropped, on every exit path.
pub struct TimerGuard {
    id: TimerId,
    scheduler: Rc<dyn Scheduler>,
}

impl TimerGuard {
    /// Schedule a timer and take ownership of it.
    pub fn acquire(scheduler: &Rc<dyn Scheduler>, kind: TimerKind) -> Self {
        let id = scheduler.schedule(kind);
        Self {
            id,
            scheduler: Rc::clone(scheduler),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether `event` was produced by this timer
    pub fn owns(&self, event: &TimerEvent) -> bool {
        self.id == event.id
    }
}

impl std::fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerGuard").field("id", &self.id).finish()
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.scheduler.cancel(self.id);
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    kind: TimerKind,
    due: Duration,
}

#[derive(Debug, Default)]
struct TimerQueue {
    next_id: u64,
    timers: BTreeMap<TimerId, PendingTimer>,
}

impl TimerQueue {
    /// Earliest pending timer, ties broken by scheduling order
    fn earliest(&self) -> Option<(TimerId, PendingTimer)> {
        self.timers
            .iter()
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, timer)| (*id, *timer))
    }
}

/// Cooperative timer queue on top of a [`TimeSource`].
///
/// Repeating timers keep a fixed cadence: the next due time is computed from the
/// previous due time, not from when the event was dequeued.
pub struct EventLoop {
    clock: Arc<dyn TimeSource>,
    queue: RefCell<TimerQueue>,
}

impl EventLoop {
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            clock,
            queue: RefCell::new(TimerQueue::default()),
        }
    }

    pub fn clock(&self) -> &Arc<dyn TimeSource> {
        &self.clock
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.queue.borrow().timers.len()
    }

    /// Due time of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow().earliest().map(|(_, timer)| timer.due)
    }

    /// Dequeue the earliest timer that is already due, without waiting.
    pub fn pop_due(&self) -> Option<TimerEvent> {
        let now = self.clock.now();
        let mut queue = self.queue.borrow_mut();
        let (id, timer) = queue.earliest()?;
        if timer.due > now {
            return None;
        }

        match timer.kind {
            TimerKind::Repeating(period) => {
                if let Some(pending) = queue.timers.get_mut(&id) {
                    pending.due = timer.due + period;
                }
            }
            TimerKind::Once(_) => {
                queue.timers.remove(&id);
            }
        }

        Some(TimerEvent {
            id,
            fired_at: timer.due,
        })
    }

    /// Wait for the next timer event, but not past `deadline`.
    ///
    /// Returns `None` once the clock has reached `deadline` with nothing due.
    pub fn wait_next(&self, deadline: Duration) -> Option<TimerEvent> {
        loop {
            if let Some(event) = self.pop_due() {
                return Some(event);
            }

            let now = self.clock.now();
            if now >= deadline {
                return None;
            }

            let wake = self
                .next_deadline()
                .map_or(deadline, |due| due.min(deadline));
            self.clock.sleep(wake.saturating_sub(now));
        }
    }

    /// Deliver every event due up to `deadline` in order, then leave the clock at `deadline`.
    ///
    /// Timers scheduled by `dispatch` are honoured within the same run.
    pub fn run_until<F>(&self, deadline: Duration, mut dispatch: F)
    where
        F: FnMut(TimerEvent),
    {
        while let Some(event) = self.wait_next(deadline) {
            dispatch(event);
        }
    }
}

impl Scheduler for EventLoop {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn schedule(&self, kind: TimerKind) -> TimerId {
        let due = self.clock.now() + kind.delay();
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;
        queue.timers.insert(id, PendingTimer { kind, due });
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.queue.borrow_mut().timers.remove(&id).is_some()
    }

    fn is_scheduled(&self, id: TimerId) -> bool {
        self.queue.borrow().timers.contains_key(&id)
    }
}
