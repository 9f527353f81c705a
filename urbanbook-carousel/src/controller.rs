//! CarouselController: the circular carousel state machine
//!
//! The controller owns the active virtual index, the auto-advance timer
//! and every deferred continuation. It never talks to a viewport
//! directly: each handler takes the current time and returns the
//! [`CarouselEffect`]s the host must apply, in order.
//!
//! Phases:
//! - `Idle`: timer running, offsets that round to another slide settle
//!   immediately, except those still on the path of a scroll the settle
//!   fallback committed before the viewport reported arrival
//! - `Settling { target }`: an animated scroll was requested; only arrival
//!   at `target` settles, timer ticks are skipped
//! - `UserDragging`: pointer captured, timer stopped, offsets are tracked
//!   and settled when the drag ends

use std::time::{Duration, Instant};

use crate::config::CarouselConfig;
use crate::error::{ConfigurationError, Result};
use crate::index::{IndexSpace, LogicalIndex, VirtualIndex};
use crate::schedule::{Continuation, ContinuationToken, Scheduler};
use crate::timer::AutoAdvanceTimer;

/// What the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resting on `active`; the timer may advance.
    Idle,
    /// An animated scroll is on its way to `target`.
    Settling {
        /// Slide whose arrival ends the phase.
        target: VirtualIndex,
    },
    /// Pointer captured; the timer is stopped.
    UserDragging,
}

/// The two halves of the settle pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PulsePhase {
    /// Scale up to `scale` over `duration`.
    Expand {
        /// Peak scale factor.
        scale: f32,
        /// Time to reach it.
        duration: Duration,
    },
    /// Scale back to rest over `duration`.
    Relax {
        /// Time to reach rest.
        duration: Duration,
    },
}

/// Instruction for the host, produced by controller handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEffect {
    /// Move the viewport to `index`. Non-animated moves are the silent
    /// jumps used on mount and for loop correction.
    ScrollTo {
        /// Destination slide.
        index: VirtualIndex,
        /// Animate, or jump silently.
        animated: bool,
    },
    /// Visual pulse; carries no state.
    Pulse(PulsePhase),
    /// The visible item changed.
    IndexChanged(LogicalIndex),
}

/// Effects of one handler call, in application order.
pub type Effects = Vec<CarouselEffect>;

/// Read-only snapshot of the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    /// Slide the viewport rests on.
    pub active: VirtualIndex,
    /// Current phase.
    pub phase: Phase,
    /// Dragging, or inside a tap and its grace period.
    pub user_interacting: bool,
    /// Middle-copy slot a scheduled loop correction will jump to.
    pub pending_correction: Option<VirtualIndex>,
}

/// Scroll the controller settled without an arrival report. The viewport
/// may still be moving along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnconfirmedScroll {
    from: VirtualIndex,
    to: VirtualIndex,
}

impl UnconfirmedScroll {
    /// `v` lies on the path from `from` (inclusive) to `to` (exclusive).
    fn passes_through(self, v: VirtualIndex) -> bool {
        let (lo, hi) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        v != self.to && lo <= v && v <= hi
    }
}

/// Circular carousel state machine over one [`IndexSpace`].
#[derive(Debug)]
pub struct CarouselController {
    space: IndexSpace,
    config: CarouselConfig,
    active: VirtualIndex,
    phase: Phase,
    timer: AutoAdvanceTimer,
    scheduler: Scheduler,
    pending_correction: Option<(ContinuationToken, VirtualIndex)>,
    pulse_relax: Option<ContinuationToken>,
    settle_fallback: Option<ContinuationToken>,
    /// Where the scroll of the current `Settling` phase started.
    settling_from: VirtualIndex,
    unconfirmed_scroll: Option<UnconfirmedScroll>,
    /// Tap whose scroll has not settled yet; its grace period starts on
    /// arrival.
    tap_target: Option<VirtualIndex>,
    interaction_release: Option<ContinuationToken>,
    /// Nearest slide observed while dragging.
    drag_tracked: Option<VirtualIndex>,
}

impl CarouselController {
    /// Mount a carousel over `len` items.
    ///
    /// Positions the viewport on the first item of the middle copy without
    /// animation and arms the auto-advance timer. No index change is
    /// reported for the initial position.
    pub fn mount(
        len: usize,
        config: CarouselConfig,
        now: Instant,
    ) -> Result<(Self, Effects)> {
        let space =
            IndexSpace::from_len(len).ok_or(ConfigurationError::EmptyItems)?;
        if config.auto_scroll_interval.is_zero() {
            return Err(ConfigurationError::ZeroInterval);
        }

        let active = space.to_middle_virtual(LogicalIndex(0));
        let mut timer = AutoAdvanceTimer::new();
        timer.start(config.auto_scroll_interval, now);

        log::debug!(
            "[CarouselController] mounted {} items at {} (interval {:?})",
            len,
            active,
            config.auto_scroll_interval
        );

        let controller = Self {
            space,
            config,
            active,
            phase: Phase::Idle,
            timer,
            scheduler: Scheduler::new(),
            pending_correction: None,
            pulse_relax: None,
            settle_fallback: None,
            settling_from: active,
            unconfirmed_scroll: None,
            tap_target: None,
            interaction_release: None,
            drag_tracked: None,
        };
        let effects = vec![CarouselEffect::ScrollTo {
            index: active,
            animated: false,
        }];
        Ok((controller, effects))
    }

    // ========== ACCESSORS ==========

    /// Index space of the mounted items.
    pub fn space(&self) -> IndexSpace {
        self.space
    }

    /// Resolved timings.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Number of original items.
    pub fn len(&self) -> usize {
        self.space.len()
    }

    /// Slide the viewport rests on.
    pub fn active(&self) -> VirtualIndex {
        self.active
    }

    /// Item shown by [`Self::active`].
    pub fn active_logical(&self) -> LogicalIndex {
        self.space.to_logical(self.active)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while dragging, or from a tap until its grace period ends.
    pub fn is_user_interacting(&self) -> bool {
        self.phase == Phase::UserDragging
            || self.tap_target.is_some()
            || self.interaction_release.is_some()
    }

    /// Whether the auto-advance timer is armed.
    pub fn is_auto_advancing(&self) -> bool {
        self.timer.is_running()
    }

    /// Snapshot for hosts and tests.
    pub fn state(&self) -> CarouselState {
        CarouselState {
            active: self.active,
            phase: self.phase,
            user_interacting: self.is_user_interacting(),
            pending_correction: self.pending_correction.map(|(_, v)| v),
        }
    }

    /// Earliest instant at which [`Self::advance_to`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timer.deadline(), self.scheduler.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ========== TIME ==========

    /// Run every continuation and timer tick due at or before `now`, in
    /// deadline order. Continuations win ties against a tick.
    pub fn advance_to(&mut self, now: Instant) -> Effects {
        let mut fx = Effects::new();
        loop {
            let continuation_at =
                self.scheduler.next_deadline().filter(|at| *at <= now);
            let tick_at = self.timer.deadline().filter(|at| *at <= now);

            match (continuation_at, tick_at) {
                (None, None) => break,
                (Some(c), Some(t)) if t < c => self.fire_tick(now, &mut fx),
                (Some(at), _) => {
                    if let Some((token, continuation)) =
                        self.scheduler.pop_due(now)
                    {
                        self.run_continuation(token, continuation, at, &mut fx);
                    }
                }
                (None, Some(_)) => self.fire_tick(now, &mut fx),
            }
        }
        fx
    }

    fn fire_tick(&mut self, now: Instant, fx: &mut Effects) {
        let Some(tick) = self.timer.poll(now) else {
            return;
        };
        let at = tick.due;

        if self.phase != Phase::Idle || self.is_user_interacting() {
            log::trace!(
                "[CarouselController] tick skipped ({:?}, interacting: {})",
                self.phase,
                self.is_user_interacting()
            );
            return;
        }

        self.flush_pending_correction(fx);
        let target = self.space.clamp(VirtualIndex(self.active.get() + 1));
        if target == self.active {
            return;
        }
        log::debug!(
            "[CarouselController] auto-advance {} -> {}",
            self.active,
            target
        );
        fx.push(CarouselEffect::ScrollTo {
            index: target,
            animated: true,
        });
        self.begin_settling(target, at);
    }

    fn run_continuation(
        &mut self,
        token: ContinuationToken,
        continuation: Continuation,
        at: Instant,
        fx: &mut Effects,
    ) {
        match continuation {
            Continuation::PulseRelax => {
                if self.pulse_relax == Some(token) {
                    self.pulse_relax = None;
                }
                fx.push(CarouselEffect::Pulse(PulsePhase::Relax {
                    duration: self.config.pulse_duration,
                }));
            }
            Continuation::LoopCorrection { target } => {
                match self.pending_correction {
                    Some((pending, _)) if pending == token => {
                        self.pending_correction = None;
                        self.apply_correction(target, fx);
                    }
                    _ => log::warn!(
                        "[CarouselController] dropping stale correction to {}",
                        target
                    ),
                }
            }
            Continuation::InteractionRelease => {
                if self.interaction_release == Some(token) {
                    self.interaction_release = None;
                    log::debug!("[CarouselController] tap grace elapsed");
                }
            }
            Continuation::SettleFallback { target } => {
                if self.settle_fallback == Some(token) {
                    self.settle_fallback = None;
                }
                if self.phase == (Phase::Settling { target }) {
                    log::debug!(
                        "[CarouselController] no arrival reported, settling at {}",
                        target
                    );
                    let from = self.settling_from;
                    self.settle(target, at, fx);
                    self.unconfirmed_scroll =
                        Some(UnconfirmedScroll { from, to: target });
                }
            }
        }
    }

    // ========== INPUT ==========

    /// Pointer captured. Preempts any auto-advance or programmatic scroll.
    pub fn drag_began(&mut self, _now: Instant) -> Effects {
        let mut fx = Effects::new();
        self.flush_pending_correction(&mut fx);
        self.scheduler.cancel_slot(&mut self.settle_fallback);
        self.scheduler.cancel_slot(&mut self.interaction_release);
        self.tap_target = None;
        self.drag_tracked = None;
        self.unconfirmed_scroll = None;
        self.timer.stop();
        self.phase = Phase::UserDragging;
        log::debug!("[CarouselController] drag began at {}", self.active);
        fx
    }

    /// Pointer released. Restarts auto-advance with a fresh window and
    /// settles at the slide the drag ended on, if it moved.
    pub fn drag_ended(&mut self, now: Instant) -> Effects {
        let mut fx = Effects::new();
        if self.phase != Phase::UserDragging {
            log::warn!(
                "[CarouselController] drag end without drag ({:?})",
                self.phase
            );
            return fx;
        }
        self.phase = Phase::Idle;
        self.timer.rearm(now);
        if let Some(v) = self.drag_tracked.take() {
            if v != self.active {
                self.settle(v, now, &mut fx);
            }
        }
        log::debug!("[CarouselController] drag ended at {}", self.active);
        fx
    }

    /// The viewport scrolled to a free-form `offset_px` with slides
    /// `slide_width_px` wide.
    pub fn scroll_offset_changed(
        &mut self,
        offset_px: f32,
        slide_width_px: f32,
        now: Instant,
    ) -> Effects {
        let mut fx = Effects::new();
        let Some(v) = self.space.nearest_slide(offset_px, slide_width_px)
        else {
            log::warn!(
                "[CarouselController] ignoring offset {} with slide width {}",
                offset_px,
                slide_width_px
            );
            return fx;
        };
        match self.phase {
            Phase::UserDragging => self.drag_tracked = Some(v),
            Phase::Settling { target } => {
                if v == target {
                    self.settle(v, now, &mut fx);
                }
            }
            Phase::Idle => {
                if let Some(scroll) = self.unconfirmed_scroll {
                    if scroll.passes_through(v) {
                        log::trace!(
                            "[CarouselController] {} still in flight to {}",
                            v,
                            scroll.to
                        );
                        return fx;
                    }
                    self.unconfirmed_scroll = None;
                }
                if v != self.active {
                    self.settle(v, now, &mut fx);
                }
            }
        }
        fx
    }

    /// The viewport reports it came to rest at `v`.
    pub fn settled_at(&mut self, v: VirtualIndex, now: Instant) -> Effects {
        let mut fx = Effects::new();
        let v = self.space.clamp(v);
        if self.phase == Phase::UserDragging {
            self.drag_tracked = Some(v);
            return fx;
        }
        self.settle(v, now, &mut fx);
        fx
    }

    /// The slide at `v` was tapped. Scrolls to the middle-copy slot of the
    /// tapped item and holds off auto-advance until the grace period after
    /// arrival has elapsed.
    pub fn tapped(&mut self, v: VirtualIndex, now: Instant) -> Effects {
        let mut fx = Effects::new();
        if self.phase == Phase::UserDragging {
            log::debug!("[CarouselController] tap ignored while dragging");
            return fx;
        }
        let v = self.space.clamp(v);
        self.flush_pending_correction(&mut fx);
        self.scheduler.cancel_slot(&mut self.interaction_release);

        let target = self.space.to_middle_virtual(self.space.to_logical(v));
        if target == self.active && self.phase == Phase::Idle {
            self.tap_target = None;
            self.schedule_interaction_release(now);
            return fx;
        }

        log::debug!(
            "[CarouselController] tap on {} -> {}",
            self.space.to_logical(v),
            target
        );
        self.tap_target = Some(target);
        fx.push(CarouselEffect::ScrollTo {
            index: target,
            animated: true,
        });
        self.begin_settling(target, now);
        fx
    }

    /// Tear down. Stops the timer and discards every continuation.
    pub fn unmount(mut self) -> CarouselState {
        self.timer.stop();
        self.scheduler.clear();
        self.pending_correction = None;
        self.pulse_relax = None;
        self.settle_fallback = None;
        self.interaction_release = None;
        self.tap_target = None;
        log::debug!("[CarouselController] unmounted at {}", self.active);
        self.state()
    }

    // ========== TRANSITIONS ==========

    fn begin_settling(&mut self, target: VirtualIndex, now: Instant) {
        self.phase = Phase::Settling { target };
        self.settling_from = self.active;
        self.unconfirmed_scroll = None;
        self.scheduler.cancel_slot(&mut self.settle_fallback);
        self.settle_fallback = Some(self.scheduler.schedule(
            now + self.config.settle_fallback,
            Continuation::SettleFallback { target },
        ));
    }

    fn settle(&mut self, v: VirtualIndex, now: Instant, fx: &mut Effects) {
        self.scheduler.cancel_slot(&mut self.settle_fallback);
        self.unconfirmed_scroll = None;
        self.phase = Phase::Idle;
        if self.tap_target.take().is_some() {
            self.schedule_interaction_release(now);
        }
        if v == self.active {
            return;
        }

        self.active = v;
        let logical = self.space.to_logical(v);
        log::debug!("[CarouselController] settled at {} ({})", v, logical);
        fx.push(CarouselEffect::IndexChanged(logical));

        fx.push(CarouselEffect::Pulse(PulsePhase::Expand {
            scale: self.config.pulse_scale,
            duration: self.config.pulse_duration,
        }));
        self.scheduler.cancel_slot(&mut self.pulse_relax);
        self.pulse_relax = Some(self.scheduler.schedule(
            now + self.config.pulse_duration,
            Continuation::PulseRelax,
        ));

        if let Some((token, _)) = self.pending_correction.take() {
            self.scheduler.cancel(token);
        }
        if let Some(target) = self.space.relocate_to_middle(v) {
            let token = self.scheduler.schedule(
                now + self.config.loop_correction_delay,
                Continuation::LoopCorrection { target },
            );
            self.pending_correction = Some((token, target));
        }

        self.on_state_change(now);
    }

    /// Every committed index change restarts the auto-advance window.
    fn on_state_change(&mut self, now: Instant) {
        if self.phase != Phase::UserDragging {
            self.timer.rearm(now);
        }
    }

    fn flush_pending_correction(&mut self, fx: &mut Effects) {
        if let Some((token, target)) = self.pending_correction.take() {
            self.scheduler.cancel(token);
            self.apply_correction(target, fx);
        }
    }

    fn apply_correction(&mut self, target: VirtualIndex, fx: &mut Effects) {
        if self.space.to_logical(target) != self.active_logical() {
            log::warn!(
                "[CarouselController] correction {} no longer matches {}",
                target,
                self.active
            );
            return;
        }
        log::debug!(
            "[CarouselController] loop correction {} -> {}",
            self.active,
            target
        );
        self.active = target;
        self.unconfirmed_scroll = None;
        fx.push(CarouselEffect::ScrollTo {
            index: target,
            animated: false,
        });
    }

    fn schedule_interaction_release(&mut self, now: Instant) {
        self.scheduler.cancel_slot(&mut self.interaction_release);
        self.interaction_release = Some(self.scheduler.schedule(
            now + self.config.interaction_grace,
            Continuation::InteractionRelease,
        ));
    }
}
