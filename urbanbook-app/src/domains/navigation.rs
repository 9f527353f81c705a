//! In-process navigation stack.

use urbanbook_contracts::navigation::{Navigator, Route, Screen};

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Screen::Welcome)
    }
}

impl NavigationStack {
    pub fn new(initial: Screen) -> Self {
        Self {
            routes: vec![Route::new(initial)],
        }
    }

    /// Top of the stack. The stack is never empty.
    pub fn current(&self) -> &Route {
        // `routes` always holds at least the root route.
        &self.routes[self.routes.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Navigator for NavigationStack {
    fn navigate(&mut self, route: Route) {
        log::debug!(
            "[Navigation] {} -> {}",
            self.current().screen,
            route.screen
        );
        self.routes.push(route);
    }

    fn replace(&mut self, route: Route) {
        log::debug!(
            "[Navigation] replacing {} with {}",
            self.current().screen,
            route.screen
        );
        if self.routes.len() > 1 {
            self.routes.pop();
            self.routes.push(route);
        } else {
            self.routes[0] = route;
        }
    }

    fn go_back(&mut self) {
        if self.routes.len() > 1 {
            let left = self.routes.pop();
            log::debug!(
                "[Navigation] back from {:?} to {}",
                left.map(|route| route.screen),
                self.current().screen
            );
        } else {
            log::debug!("[Navigation] back ignored at root");
        }
    }

    fn reset_to(&mut self, screen: Screen) {
        log::debug!("[Navigation] reset to {}", screen);
        self.routes.clear();
        self.routes.push(Route::new(screen));
    }
}
