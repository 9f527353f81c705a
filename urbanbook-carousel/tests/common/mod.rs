//! Deterministic driver for controller tests.
//!
//! Plays the role of the viewport: animated scroll requests arrive after
//! `snap`, silent jumps apply immediately. Time only moves through
//! [`Harness::advance`].

#![allow(dead_code)]

use std::time::{Duration, Instant};

use urbanbook_carousel::{
    CarouselConfig, CarouselController, CarouselEffect, LogicalIndex,
    VirtualIndex,
};

pub const SLIDE_WIDTH: f32 = 390.0;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Debug)]
pub struct Harness {
    pub controller: CarouselController,
    pub t0: Instant,
    pub now: Instant,
    pub snap: Duration,
    pub reported: Vec<LogicalIndex>,
    pub animated: Vec<VirtualIndex>,
    pub jumps: Vec<VirtualIndex>,
    pub pulses: usize,
    in_flight: Option<(VirtualIndex, Instant)>,
}

impl Harness {
    pub fn mount(len: usize, interval_ms: u64) -> Self {
        let config =
            CarouselConfig::with_interval_ms(interval_ms).expect("valid");
        let t0 = Instant::now();
        let (controller, fx) =
            CarouselController::mount(len, config, t0).expect("mounted");
        let mut harness = Self {
            controller,
            t0,
            now: t0,
            snap: ms(300),
            reported: Vec::new(),
            animated: Vec::new(),
            jumps: Vec::new(),
            pulses: 0,
            in_flight: None,
        };
        harness.apply(fx);
        harness
    }

    pub fn len(&self) -> usize {
        self.controller.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.now - self.t0
    }

    /// Move time forward, delivering viewport arrivals and controller
    /// deadlines in order.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        loop {
            let arrival = self.in_flight.map(|(_, at)| at);
            let deadline = self.controller.next_deadline();
            let next = match (arrival, deadline) {
                (Some(a), Some(d)) => a.min(d),
                (a, d) => match a.or(d) {
                    Some(at) => at,
                    None => break,
                },
            };
            if next > until {
                break;
            }
            self.now = next.max(self.now);
            match self.in_flight {
                Some((target, at)) if at <= self.now => {
                    self.in_flight = None;
                    let fx = self.controller.settled_at(target, self.now);
                    self.apply(fx);
                }
                _ => {
                    let fx = self.controller.advance_to(self.now);
                    self.apply(fx);
                }
            }
        }
        self.now = until;
    }

    pub fn drag_to(&mut self, v: VirtualIndex) {
        self.in_flight = None;
        let fx = self.controller.drag_began(self.now);
        self.apply(fx);
        let offset = v.get() as f32 * SLIDE_WIDTH;
        let fx =
            self.controller
                .scroll_offset_changed(offset, SLIDE_WIDTH, self.now);
        self.apply(fx);
        let fx = self.controller.drag_ended(self.now);
        self.apply(fx);
    }

    pub fn drag_began(&mut self) {
        self.in_flight = None;
        let fx = self.controller.drag_began(self.now);
        self.apply(fx);
    }

    pub fn drag_ended(&mut self) {
        let fx = self.controller.drag_ended(self.now);
        self.apply(fx);
    }

    /// Report a free-form offset of `slides` slide widths.
    pub fn scroll_offset(&mut self, slides: f32) {
        let fx = self.controller.scroll_offset_changed(
            slides * SLIDE_WIDTH,
            SLIDE_WIDTH,
            self.now,
        );
        self.apply(fx);
    }

    pub fn tap(&mut self, v: VirtualIndex) {
        let fx = self.controller.tapped(v, self.now);
        self.apply(fx);
    }

    pub fn settle(&mut self, v: VirtualIndex) {
        self.in_flight = None;
        let fx = self.controller.settled_at(v, self.now);
        self.apply(fx);
    }

    fn apply(&mut self, fx: Vec<CarouselEffect>) {
        for effect in fx {
            match effect {
                CarouselEffect::ScrollTo {
                    index,
                    animated: true,
                } => {
                    self.animated.push(index);
                    self.in_flight = Some((index, self.now + self.snap));
                }
                CarouselEffect::ScrollTo {
                    index,
                    animated: false,
                } => self.jumps.push(index),
                CarouselEffect::Pulse(_) => self.pulses += 1,
                CarouselEffect::IndexChanged(index) => {
                    self.reported.push(index)
                }
            }
        }
    }
}
