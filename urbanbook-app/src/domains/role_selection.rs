//! Role selection: Student and Teacher cards on a carousel.

use urbanbook_carousel::{CarouselItem, CarouselProps, LogicalIndex};
use urbanbook_contracts::navigation::{Navigator, Route, RouteParams, Screen};
use urbanbook_contracts::role::Role;

use crate::infra::constants::role_selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCard {
    pub role: Role,
}

impl RoleCard {
    pub fn description(&self) -> &'static str {
        match self.role {
            Role::Student => {
                "Join as a student to access learning materials and \
                 collaborate with teachers."
            }
            Role::Teacher => {
                "Join as a teacher to create courses and manage your students."
            }
        }
    }
}

impl CarouselItem for RoleCard {
    type Id = u32;

    fn item_id(&self) -> u32 {
        self.role.id()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelectionScreen {
    cards: Vec<RoleCard>,
    active: LogicalIndex,
}

impl Default for RoleSelectionScreen {
    fn default() -> Self {
        Self {
            cards: Role::ALL.into_iter().map(|role| RoleCard { role }).collect(),
            active: LogicalIndex(0),
        }
    }
}

impl RoleSelectionScreen {
    pub fn cards(&self) -> &[RoleCard] {
        &self.cards
    }

    pub fn carousel_props<R, F>(
        &self,
        render: F,
    ) -> CarouselProps<RoleCard, R>
    where
        F: Fn(&RoleCard, LogicalIndex) -> R + 'static,
    {
        CarouselProps::new(self.cards.clone(), render)
            .auto_scroll_interval_ms(role_selection::AUTO_SCROLL_INTERVAL_MS)
    }

    pub fn on_index_change(&mut self, index: LogicalIndex) {
        if index.get() < self.cards.len() {
            self.active = index;
        }
    }

    pub fn active_card(&self) -> Option<&RoleCard> {
        self.cards.get(self.active.get())
    }

    /// Label of the continue button.
    pub fn continue_label(&self) -> String {
        match self.active_card() {
            Some(card) => format!("Continue as {}", card.role),
            None => "Select Role".to_string(),
        }
    }

    /// Continue with the role under the carousel.
    pub fn continue_with_active(&self, navigator: &mut dyn Navigator) {
        if let Some(card) = self.active_card() {
            self.select(card.role, navigator);
        }
    }

    pub fn select(&self, role: Role, navigator: &mut dyn Navigator) {
        log::info!("[RoleSelection] continuing as {}", role);
        navigator.navigate(Route::with_params(
            Screen::Auth,
            RouteParams::Role(role),
        ));
    }

    pub fn back(&self, navigator: &mut dyn Navigator) {
        navigator.go_back();
    }
}
