//! CarouselView: binds a controller to items, a template and a viewport
//!
//! The view renders the tripled item sequence through the caller's
//! template, forwards drag/scroll/tap signals to the
//! [`CarouselController`] and applies the effects it returns. It keeps no
//! state of its own and does no index arithmetic.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::CarouselOverrides;
use crate::constants::{pulse, timing};
use crate::controller::{
    CarouselController, CarouselEffect, CarouselState, Effects, PulsePhase,
};
use crate::error::Result;
use crate::index::{LogicalIndex, VirtualIndex};

/// Anything a carousel can show. The id is only used for slide keys.
pub trait CarouselItem {
    /// Stable identifier, rendered into slide keys.
    type Id: fmt::Display;

    /// Identifier of this item.
    fn item_id(&self) -> Self::Id;
}

/// Scrollable surface the carousel drives.
pub trait Viewport {
    /// Move to the slide at `index`, animated or as a silent jump.
    fn scroll_to_index(&mut self, index: VirtualIndex, animated: bool);

    /// Scale the whole carousel (settle pulse). Defaults to ignoring it.
    fn set_scale(&mut self, _scale: f32, _duration: Duration) {}
}

/// Item template: item and its logical index to an element.
pub type RenderFn<T, R> = Box<dyn Fn(&T, LogicalIndex) -> R>;
/// Called once per committed change of the visible item.
pub type IndexChangeFn = Box<dyn FnMut(LogicalIndex)>;

/// Public inputs of a carousel.
pub struct CarouselProps<T, R> {
    /// Non-empty, ordered items.
    pub items: Vec<T>,
    /// Template applied to every slide.
    pub render_item: RenderFn<T, R>,
    /// Visible item changed.
    pub on_index_change: IndexChangeFn,
    /// Positive milliseconds.
    pub auto_scroll_interval_ms: u64,
}

impl<T, R> CarouselProps<T, R> {
    /// Props with the default interval and no change callback.
    pub fn new<F>(items: Vec<T>, render_item: F) -> Self
    where
        F: Fn(&T, LogicalIndex) -> R + 'static,
    {
        Self {
            items,
            render_item: Box::new(render_item),
            on_index_change: Box::new(|_| {}),
            auto_scroll_interval_ms: timing::AUTO_SCROLL_INTERVAL_MS,
        }
    }

    /// Set the index change callback.
    pub fn on_index_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(LogicalIndex) + 'static,
    {
        self.on_index_change = Box::new(f);
        self
    }

    /// Set the auto-advance interval.
    pub fn auto_scroll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.auto_scroll_interval_ms = interval_ms;
        self
    }
}

impl<T, R> fmt::Debug for CarouselProps<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselProps")
            .field("items", &self.items.len())
            .field("auto_scroll_interval_ms", &self.auto_scroll_interval_ms)
            .finish_non_exhaustive()
    }
}

/// One position of the tripled sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide<'a, T> {
    /// `"{item_id}-{virtual_index}"`, unique across the three copies.
    pub key: String,
    /// Position in the tripled sequence.
    pub virtual_index: VirtualIndex,
    /// Item shown.
    pub logical_index: LogicalIndex,
    /// The item itself.
    pub item: &'a T,
}

/// A slide passed through the caller's template.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlide<R> {
    /// Same key as the source [`Slide`].
    pub key: String,
    /// Position in the tripled sequence.
    pub virtual_index: VirtualIndex,
    /// Template output.
    pub element: R,
}

/// A mounted carousel: items, template, viewport and controller.
pub struct CarouselView<T, R, V> {
    items: Vec<T>,
    render_item: RenderFn<T, R>,
    on_index_change: IndexChangeFn,
    viewport: V,
    controller: CarouselController,
}

impl<T, R, V> fmt::Debug for CarouselView<T, R, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselView")
            .field("items", &self.items.len())
            .field("viewport", &self.viewport)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl<T, R, V> CarouselView<T, R, V>
where
    T: CarouselItem,
    V: Viewport,
{
    /// Mount with default timings and the interval from `props`.
    pub fn mount(
        props: CarouselProps<T, R>,
        viewport: V,
        now: Instant,
    ) -> Result<Self> {
        let overrides = CarouselOverrides {
            auto_scroll_interval_ms: Some(props.auto_scroll_interval_ms),
            ..CarouselOverrides::default()
        };
        Self::mount_with_overrides(props, viewport, &overrides, now)
    }

    /// Mount with explicit timing overrides. The interval from `props`
    /// wins over the one in `overrides`.
    pub fn mount_with_overrides(
        props: CarouselProps<T, R>,
        viewport: V,
        overrides: &CarouselOverrides,
        now: Instant,
    ) -> Result<Self> {
        let config = CarouselOverrides {
            auto_scroll_interval_ms: Some(props.auto_scroll_interval_ms),
            ..overrides.clone()
        }
        .resolve()?;
        let (controller, fx) =
            CarouselController::mount(props.items.len(), config, now)?;
        let mut view = Self {
            items: props.items,
            render_item: props.render_item,
            on_index_change: props.on_index_change,
            viewport,
            controller,
        };
        view.apply(fx);
        Ok(view)
    }

    // ========== RENDERING ==========

    /// Every position of the tripled sequence, head copy first.
    pub fn slides(&self) -> impl Iterator<Item = Slide<'_, T>> + '_ {
        let space = self.controller.space();
        (0..space.virtual_len()).map(move |v| {
            let virtual_index = VirtualIndex(v);
            let logical_index = space.to_logical(virtual_index);
            let item = &self.items[logical_index.get()];
            Slide {
                key: format!("{}-{}", item.item_id(), v),
                virtual_index,
                logical_index,
                item,
            }
        })
    }

    /// Run the template over [`Self::slides`].
    pub fn render(&self) -> Vec<RenderedSlide<R>> {
        self.slides()
            .map(|slide| RenderedSlide {
                element: (self.render_item)(slide.item, slide.logical_index),
                key: slide.key,
                virtual_index: slide.virtual_index,
            })
            .collect()
    }

    /// Original items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Item under the viewport.
    pub fn active_item(&self) -> &T {
        &self.items[self.controller.active_logical().get()]
    }

    /// Underlying state machine.
    pub fn controller(&self) -> &CarouselController {
        &self.controller
    }

    /// Driven viewport.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Driven viewport, mutably.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// When [`Self::tick`] next has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    // ========== SIGNALS ==========

    /// Run timers and continuations due by `now`.
    pub fn tick(&mut self, now: Instant) {
        let fx = self.controller.advance_to(now);
        self.apply(fx);
    }

    /// Forward a drag start.
    pub fn drag_began(&mut self, now: Instant) {
        let fx = self.controller.drag_began(now);
        self.apply(fx);
    }

    /// Forward a drag end.
    pub fn drag_ended(&mut self, now: Instant) {
        let fx = self.controller.drag_ended(now);
        self.apply(fx);
    }

    /// Forward a scroll offset report.
    pub fn scroll_offset_changed(
        &mut self,
        offset_px: f32,
        slide_width_px: f32,
        now: Instant,
    ) {
        let fx = self.controller.scroll_offset_changed(
            offset_px,
            slide_width_px,
            now,
        );
        self.apply(fx);
    }

    /// Forward an arrival report.
    pub fn settled_at(&mut self, index: VirtualIndex, now: Instant) {
        let fx = self.controller.settled_at(index, now);
        self.apply(fx);
    }

    /// Forward a tap on the slide at `index`.
    pub fn tapped(&mut self, index: VirtualIndex, now: Instant) {
        let fx = self.controller.tapped(index, now);
        self.apply(fx);
    }

    /// Tear down, handing back the viewport and the final state.
    pub fn unmount(self) -> (V, CarouselState) {
        let state = self.controller.unmount();
        (self.viewport, state)
    }

    fn apply(&mut self, fx: Effects) {
        for effect in fx {
            match effect {
                CarouselEffect::ScrollTo { index, animated } => {
                    self.viewport.scroll_to_index(index, animated);
                }
                CarouselEffect::Pulse(PulsePhase::Expand { scale, duration }) => {
                    self.viewport.set_scale(scale, duration);
                }
                CarouselEffect::Pulse(PulsePhase::Relax { duration }) => {
                    self.viewport.set_scale(pulse::REST_SCALE, duration);
                }
                CarouselEffect::IndexChanged(index) => {
                    (self.on_index_change)(index);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: u32,
        title: &'static str,
    }

    impl CarouselItem for Card {
        type Id = u32;

        fn item_id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug, Default)]
    struct RecordingViewport {
        scrolls: Vec<(VirtualIndex, bool)>,
        scales: Vec<f32>,
    }

    impl Viewport for RecordingViewport {
        fn scroll_to_index(&mut self, index: VirtualIndex, animated: bool) {
            self.scrolls.push((index, animated));
        }

        fn set_scale(&mut self, scale: f32, _duration: Duration) {
            self.scales.push(scale);
        }
    }

    fn cards() -> Vec<Card> {
        vec![
            Card { id: 1, title: "UrbanBook" },
            Card { id: 2, title: "Live Sync" },
        ]
    }

    #[test]
    fn empty_items_are_rejected() {
        let props = CarouselProps::new(Vec::<Card>::new(), |c: &Card, _| c.title);
        let err = CarouselView::mount(
            props,
            RecordingViewport::default(),
            Instant::now(),
        )
        .expect_err("empty");
        assert_eq!(err, ConfigurationError::EmptyItems);
    }

    #[test]
    fn renders_three_keyed_copies() {
        let props =
            CarouselProps::new(cards(), |c: &Card, i| format!("{}#{}", c.title, i));
        let view = CarouselView::mount(
            props,
            RecordingViewport::default(),
            Instant::now(),
        )
        .expect("mounted");

        let rendered = view.render();
        let keys: Vec<_> = rendered.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["1-0", "2-1", "1-2", "2-3", "1-4", "2-5"]);
        assert_eq!(rendered[3].element, "Live Sync#1");
        assert_eq!(view.viewport().scrolls, vec![(VirtualIndex(2), false)]);
        assert_eq!(view.active_item().title, "UrbanBook");
    }

    #[test]
    fn forwards_effects_to_viewport_and_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let props = CarouselProps::new(cards(), |c: &Card, _| c.id)
            .on_index_change(move |i| sink.borrow_mut().push(i))
            .auto_scroll_interval_ms(4000);
        let t0 = Instant::now();
        let mut view =
            CarouselView::mount(props, RecordingViewport::default(), t0)
                .expect("mounted");

        view.tick(t0 + Duration::from_millis(4000));
        assert_eq!(
            view.viewport().scrolls.last(),
            Some(&(VirtualIndex(3), true))
        );
        view.settled_at(VirtualIndex(3), t0 + Duration::from_millis(4300));
        assert_eq!(*seen.borrow(), vec![LogicalIndex(1)]);
        assert_eq!(view.viewport().scales, vec![1.05]);

        view.tick(t0 + Duration::from_millis(4500));
        assert_eq!(view.viewport().scales, vec![1.05, 1.0]);
        assert_eq!(view.active_item().title, "Live Sync");

        let (viewport, state) = view.unmount();
        assert_eq!(state.active, VirtualIndex(3));
        assert_eq!(viewport.scrolls.len(), 2);
    }
}
