//! Cancellable timers on an injected clock.
//!
//! The session never sleeps. A driver passes the current monotonic time into
//! [`TimerQueue::pop_due`], and each fired [`TimerHandle`] is matched against
//! the handles the session still holds. Cancelling removes the timer outright,
//! so a handle from an earlier session or pause can never fire again.

use std::time::Duration;

/// Opaque identity of one scheduled timer. Never reused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    deadline: Duration,
    period: Option<Duration>,
}

/// Pending one-shot and repeating timers.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer that fires once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration) -> TimerHandle {
        self.insert(now + delay, None)
    }

    /// Schedules a timer that fires every `period`, first at `now + period`.
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_repeating(&mut self, now: Duration, period: Duration) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.insert(now + period, Some(period))
    }

    /// Cancels `handle`. Returns false when it was not scheduled; cancelling
    /// twice is harmless.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    /// Returns true while `handle` can still fire.
    #[must_use]
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Pops the earliest timer due at or before `now`.
    ///
    /// Ties go to the timer scheduled first. Repeating timers are re-armed at
    /// the first period boundary after `now`, so a driver that fell behind
    /// gets one firing rather than a burst of missed ones.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerHandle> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.handle))
            .map(|(index, _)| index)?;

        let Timer { handle, period, .. } = self.timers[index];
        match period {
            Some(period) => {
                let timer = &mut self.timers[index];
                while timer.deadline <= now {
                    timer.deadline += period;
                }
            }
            None => {
                let _ = self.timers.swap_remove(index);
            }
        }
        Some(handle)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    fn insert(&mut self, deadline: Duration, period: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            deadline,
            period,
        });
        handle
    }
}
