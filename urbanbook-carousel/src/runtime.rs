//! Tokio driver for a carousel controller
//!
//! One task owns one [`CarouselController`]. Input events arrive over a
//! channel and are handled one at a time; between events the task sleeps
//! until the controller's next deadline. Effects are forwarded to the
//! handle in the order the controller produced them.

use std::time::Instant as StdInstant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::config::CarouselConfig;
use crate::controller::{
    CarouselController, CarouselEffect, CarouselState, Effects,
};
use crate::error::Result;
use crate::index::VirtualIndex;

/// Input event for a running carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselCommand {
    /// Pointer captured.
    DragBegan,
    /// Pointer released.
    DragEnded,
    /// Free-form scroll position.
    ScrollOffset {
        /// Horizontal offset (px).
        offset_px: f32,
        /// Width of one slide (px).
        slide_width_px: f32,
    },
    /// Viewport came to rest on a slide.
    Settled(VirtualIndex),
    /// Slide was tapped.
    Tapped(VirtualIndex),
    /// Stop the task.
    Unmount,
}

/// Owner side of a spawned carousel.
#[derive(Debug)]
pub struct CarouselHandle {
    commands: mpsc::UnboundedSender<CarouselCommand>,
    effects: mpsc::UnboundedReceiver<CarouselEffect>,
    task: JoinHandle<CarouselState>,
}

impl CarouselHandle {
    /// Queue an input event. Returns `false` once the carousel has stopped.
    pub fn send(&self, command: CarouselCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Wait for the next effect. `None` after the carousel stopped and
    /// every queued effect was consumed.
    pub async fn next_effect(&mut self) -> Option<CarouselEffect> {
        self.effects.recv().await
    }

    /// Take an already queued effect without waiting.
    pub fn try_next_effect(&mut self) -> Option<CarouselEffect> {
        self.effects.try_recv().ok()
    }

    /// Unmount and wait for the task, returning the final state.
    pub async fn shutdown(self) -> Option<CarouselState> {
        let _ = self.commands.send(CarouselCommand::Unmount);
        match self.task.await {
            Ok(state) => Some(state),
            Err(err) => {
                log::error!("[CarouselRuntime] carousel task failed: {}", err);
                None
            }
        }
    }
}

/// Mount a carousel over `len` items and drive it from a new tokio task.
///
/// The mount effects are queued on the handle before the task starts.
/// Must be called from within a tokio runtime.
pub fn spawn_carousel(
    len: usize,
    config: CarouselConfig,
) -> Result<CarouselHandle> {
    let now = Instant::now().into_std();
    let (controller, initial) = CarouselController::mount(len, config, now)?;

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (effect_tx, effect_rx) = mpsc::unbounded_channel();
    forward(&effect_tx, initial);

    let task = tokio::spawn(run(controller, command_rx, effect_tx));
    Ok(CarouselHandle {
        commands: command_tx,
        effects: effect_rx,
        task,
    })
}

async fn run(
    mut controller: CarouselController,
    mut commands: mpsc::UnboundedReceiver<CarouselCommand>,
    effects: mpsc::UnboundedSender<CarouselEffect>,
) -> CarouselState {
    loop {
        let deadline = controller.next_deadline();
        let fx = tokio::select! {
            command = commands.recv() => {
                let now = Instant::now().into_std();
                match command {
                    None | Some(CarouselCommand::Unmount) => break,
                    Some(command) => dispatch(&mut controller, command, now),
                }
            }
            () = sleep_until(deadline) => {
                controller.advance_to(Instant::now().into_std())
            }
        };
        if !forward(&effects, fx) {
            log::debug!("[CarouselRuntime] effect receiver dropped");
            break;
        }
    }
    controller.unmount()
}

fn dispatch(
    controller: &mut CarouselController,
    command: CarouselCommand,
    now: StdInstant,
) -> Effects {
    match command {
        CarouselCommand::DragBegan => controller.drag_began(now),
        CarouselCommand::DragEnded => controller.drag_ended(now),
        CarouselCommand::ScrollOffset {
            offset_px,
            slide_width_px,
        } => controller.scroll_offset_changed(offset_px, slide_width_px, now),
        CarouselCommand::Settled(index) => controller.settled_at(index, now),
        CarouselCommand::Tapped(index) => controller.tapped(index, now),
        CarouselCommand::Unmount => Effects::new(),
    }
}

async fn sleep_until(deadline: Option<StdInstant>) {
    match deadline {
        Some(at) => time::sleep_until(Instant::from_std(at)).await,
        None => std::future::pending::<()>().await,
    }
}

fn forward(
    effects: &mpsc::UnboundedSender<CarouselEffect>,
    fx: Effects,
) -> bool {
    fx.into_iter().all(|effect| effects.send(effect).is_ok())
}
