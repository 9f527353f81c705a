//! Cancellable periodic trigger for carousel auto-advance
//!
//! The timer does not own a callback. Its owner polls it with the current
//! time and reacts to the returned [`TimerTick`], so the tick handler can
//! mutate the owner directly and is never re-entered.

use std::time::{Duration, Instant};

/// One firing of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    /// Deadline this tick was scheduled for.
    pub due: Instant,
    /// Schedule the tick belongs to. Bumped by every `start`.
    pub generation: u64,
}

/// Fixed-rate auto-advance schedule, polled by its owner.
#[derive(Debug, Clone, Default)]
pub struct AutoAdvanceTimer {
    interval: Duration,
    next_fire: Option<Instant>,
    generation: u64,
}

impl AutoAdvanceTimer {
    /// Stopped timer with no interval.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. The first tick is due one full interval from `now`.
    /// Any schedule already running is replaced, not stacked.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.generation = self.generation.wrapping_add(1);
        self.next_fire = Some(now + interval);
        log::trace!(
            "[AutoAdvanceTimer] armed generation {} every {:?}",
            self.generation,
            interval
        );
    }

    /// Cancel the schedule. Safe to call when not running.
    pub fn stop(&mut self) {
        if self.next_fire.take().is_some() {
            log::trace!(
                "[AutoAdvanceTimer] stopped generation {}",
                self.generation
            );
        }
    }

    /// Restart with the interval of the previous `start`, opening a fresh
    /// window. Does nothing if the timer was never started.
    pub fn rearm(&mut self, now: Instant) {
        if !self.interval.is_zero() {
            self.start(self.interval, now);
        }
    }

    /// Whether a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Interval of the last `start`.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current schedule generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deadline of the next tick while running.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_fire
    }

    /// Fire at most one due tick. The next deadline moves forward by one
    /// interval from the one that fired, so a late poll catches up one
    /// tick per call instead of bursting.
    pub fn poll(&mut self, now: Instant) -> Option<TimerTick> {
        let due = self.next_fire?;
        if now < due {
            return None;
        }
        self.next_fire = Some(due + self.interval);
        Some(TimerTick {
            due,
            generation: self.generation,
        })
    }
}
