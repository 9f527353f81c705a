//! Circular carousel core for UrbanBook.
//!
//! A finite, ordered set of items is presented as an infinite loop by
//! rendering it three times (head copy, middle copy, tail copy) and
//! silently jumping back into the middle copy whenever a settle lands in
//! one of the outer copies. The carousel auto-advances on a timer and
//! yields to drags and taps.
//!
//! The crate is layered leaves first:
//!
//! - [`index`] maps between virtual (tripled) and logical indices
//! - [`timer`] is the cancellable auto-advance trigger
//! - [`schedule`] holds delayed continuations behind cancellation tokens
//! - [`controller`] is the state machine tying the three together
//! - [`view`] binds a controller to an item template and a [`Viewport`]
//! - [`runtime`] drives a controller from a tokio task
//!
//! Outside [`runtime`] nothing blocks or reads the clock: every handler
//! takes the current [`std::time::Instant`], which keeps the state machine
//! deterministic under test.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod index;
pub mod runtime;
pub mod schedule;
pub mod timer;
pub mod view;

pub use config::{CarouselConfig, CarouselOverrides};
pub use controller::{
    CarouselController, CarouselEffect, CarouselState, Phase, PulsePhase,
};
pub use error::ConfigurationError;
pub use index::{IndexSpace, LogicalIndex, VirtualIndex};
pub use runtime::{CarouselCommand, CarouselHandle, spawn_carousel};
pub use timer::AutoAdvanceTimer;
pub use view::{CarouselItem, CarouselProps, CarouselView, Slide, Viewport};
