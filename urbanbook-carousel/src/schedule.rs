//! Delayed continuations with cancellation tokens
//!
//! The controller never sleeps. Work that must happen later (relaxing the
//! pulse, the loop correction jump, releasing the interaction flag, the
//! settle fallback) is queued here and handed back once its deadline has
//! passed. Entries run in deadline order; entries sharing a deadline run
//! in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::index::VirtualIndex;

/// Work the controller deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Second half of the settle pulse: scale back down.
    PulseRelax,
    /// Silent jump from an outer copy into the middle copy.
    LoopCorrection {
        /// Middle-copy slot to jump to.
        target: VirtualIndex,
    },
    /// Lower the interaction flag raised by a tap.
    InteractionRelease,
    /// Settle at the requested slide if the viewport never reported it.
    SettleFallback {
        /// Slide the scroll was requested to reach.
        target: VirtualIndex,
    },
}

/// Handle for cancelling a scheduled continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContinuationToken(u64);

/// Deadline-ordered queue of [`Continuation`]s.
#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    queue: BTreeMap<(Instant, u64), Continuation>,
    deadlines: HashMap<u64, Instant>,
    next_seq: u64,
}

impl Scheduler {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `continuation` to run once `at` has passed.
    pub fn schedule(
        &mut self,
        at: Instant,
        continuation: Continuation,
    ) -> ContinuationToken {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.insert((at, seq), continuation);
        self.deadlines.insert(seq, at);
        ContinuationToken(seq)
    }

    /// Cancel a pending continuation. Returns it if it had not run yet.
    pub fn cancel(&mut self, token: ContinuationToken) -> Option<Continuation> {
        let at = self.deadlines.remove(&token.0)?;
        self.queue.remove(&(at, token.0))
    }

    /// Cancel through an optional token slot, clearing the slot.
    pub fn cancel_slot(&mut self, slot: &mut Option<ContinuationToken>) {
        if let Some(token) = slot.take() {
            self.cancel(token);
        }
    }

    /// Whether `token` is still queued.
    pub fn is_pending(&self, token: ContinuationToken) -> bool {
        self.deadlines.contains_key(&token.0)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Remove and return the earliest continuation whose deadline is at or
    /// before `now`.
    pub fn pop_due(
        &mut self,
        now: Instant,
    ) -> Option<(ContinuationToken, Continuation)> {
        let (&(at, seq), _) = self.queue.first_key_value()?;
        if at > now {
            return None;
        }
        let continuation = self.queue.remove(&(at, seq))?;
        self.deadlines.remove(&seq);
        Some((ContinuationToken(seq), continuation))
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }

    /// Queued continuations.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Nothing queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pops_in_deadline_then_schedule_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(t0 + Duration::from_millis(200), Continuation::PulseRelax);
        s.schedule(
            t0 + Duration::from_millis(100),
            Continuation::InteractionRelease,
        );
        s.schedule(
            t0 + Duration::from_millis(200),
            Continuation::LoopCorrection {
                target: VirtualIndex(4),
            },
        );

        let now = t0 + Duration::from_millis(500);
        let order: Vec<_> =
            std::iter::from_fn(|| s.pop_due(now).map(|(_, c)| c)).collect();
        assert_eq!(
            order,
            vec![
                Continuation::InteractionRelease,
                Continuation::PulseRelax,
                Continuation::LoopCorrection {
                    target: VirtualIndex(4)
                },
            ]
        );
        assert!(s.is_empty());
    }

    #[test]
    fn nothing_due_before_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(t0 + Duration::from_millis(200), Continuation::PulseRelax);
        assert_eq!(s.pop_due(t0 + Duration::from_millis(199)), None);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn cancelled_continuations_never_run() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let token = s.schedule(t0, Continuation::PulseRelax);
        assert!(s.is_pending(token));
        assert_eq!(s.cancel(token), Some(Continuation::PulseRelax));
        assert_eq!(s.cancel(token), None);
        assert!(!s.is_pending(token));
        assert_eq!(s.pop_due(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn cancel_slot_clears_slot() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        let mut slot = Some(s.schedule(t0, Continuation::InteractionRelease));
        s.cancel_slot(&mut slot);
        assert!(slot.is_none());
        assert!(s.is_empty());
        s.cancel_slot(&mut slot);
    }
}
