//! Welcome screen: feature highlights on an auto-advancing carousel.

use urbanbook_carousel::{CarouselItem, CarouselProps, LogicalIndex};
use urbanbook_contracts::navigation::{Navigator, Route, Screen};

use crate::infra::constants::welcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeEvent {
    pub id: u32,
    pub title: &'static str,
}

impl CarouselItem for WelcomeEvent {
    type Id = u32;

    fn item_id(&self) -> u32 {
        self.id
    }
}

pub const WELCOME_EVENTS: [WelcomeEvent; 8] = [
    WelcomeEvent { id: 1, title: "UrbanBook" },
    WelcomeEvent { id: 2, title: "Seamless Scheduling" },
    WelcomeEvent { id: 3, title: "Video Classes" },
    WelcomeEvent { id: 4, title: "Live Sync" },
    WelcomeEvent { id: 5, title: "Homework Mastery" },
    WelcomeEvent { id: 6, title: "Seamless Scheduling" },
    WelcomeEvent { id: 7, title: "Video Classes" },
    WelcomeEvent { id: 8, title: "Live Sync" },
];

/// Screen state. The carousel reports the visible event; the background
/// follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeScreen {
    events: Vec<WelcomeEvent>,
    active: LogicalIndex,
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new(WELCOME_EVENTS.to_vec())
    }
}

impl WelcomeScreen {
    pub fn new(events: Vec<WelcomeEvent>) -> Self {
        Self {
            events,
            active: LogicalIndex(0),
        }
    }

    pub fn events(&self) -> &[WelcomeEvent] {
        &self.events
    }

    /// Carousel inputs for this screen's events.
    pub fn carousel_props<R, F>(
        &self,
        render: F,
    ) -> CarouselProps<WelcomeEvent, R>
    where
        F: Fn(&WelcomeEvent, LogicalIndex) -> R + 'static,
    {
        CarouselProps::new(self.events.clone(), render)
            .auto_scroll_interval_ms(welcome::AUTO_SCROLL_INTERVAL_MS)
    }

    pub fn on_index_change(&mut self, index: LogicalIndex) {
        if index.get() < self.events.len() {
            self.active = index;
        } else {
            log::warn!("[WelcomeScreen] index {} out of range", index);
        }
    }

    /// Event shown behind the carousel.
    pub fn background(&self) -> Option<&WelcomeEvent> {
        self.events.get(self.active.get())
    }

    /// "Get started" button.
    pub fn get_started(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(Route::new(Screen::RoleSelection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::navigation::NavigationStack;

    #[test]
    fn background_follows_reported_index() {
        let mut screen = WelcomeScreen::default();
        assert_eq!(screen.background().map(|e| e.title), Some("UrbanBook"));
        screen.on_index_change(LogicalIndex(4));
        assert_eq!(
            screen.background().map(|e| e.title),
            Some("Homework Mastery")
        );
        screen.on_index_change(LogicalIndex(99));
        assert_eq!(screen.background().map(|e| e.id), Some(5));
    }

    #[test]
    fn carousel_uses_welcome_interval() {
        let props = WelcomeScreen::default().carousel_props(|e, _| e.id);
        assert_eq!(props.items.len(), 8);
        assert_eq!(props.auto_scroll_interval_ms, 4000);
    }

    #[test]
    fn get_started_opens_role_selection() {
        let mut nav = NavigationStack::default();
        WelcomeScreen::default().get_started(&mut nav);
        assert_eq!(nav.current().screen, Screen::RoleSelection);
    }
}
