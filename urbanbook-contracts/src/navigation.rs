//! Screen routing contract.
//!
//! Screens never own the navigation stack; they ask a [`Navigator`] to
//! push, replace or reset routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::profile::VerificationResponse;
use crate::role::Role;

/// Screens of the app, by route name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Welcome carousel.
    Welcome,
    /// Student or teacher choice.
    RoleSelection,
    /// Identity SDK sign-in.
    Auth,
    /// Profile completion form.
    CompleteProfile,
    /// Student home.
    StudentDashboard,
    /// Teacher home.
    TeacherDashboard,
}

impl Screen {
    /// Every screen, in onboarding order.
    pub const ALL: [Screen; 6] = [
        Screen::Welcome,
        Screen::RoleSelection,
        Screen::Auth,
        Screen::CompleteProfile,
        Screen::StudentDashboard,
        Screen::TeacherDashboard,
    ];

    /// Route name as the backend spells it in `dashboard_route`.
    pub fn route_name(self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::RoleSelection => "RoleSelection",
            Screen::Auth => "Auth",
            Screen::CompleteProfile => "CompleteProfile",
            Screen::StudentDashboard => "StudentDashboard",
            Screen::TeacherDashboard => "TeacherDashboard",
        }
    }

    /// Inverse of [`Self::route_name`], ignoring surrounding whitespace.
    pub fn from_route_name(name: &str) -> Option<Screen> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.route_name() == name.trim())
    }

    /// Student or teacher dashboard.
    pub fn is_dashboard(self) -> bool {
        matches!(self, Screen::StudentDashboard | Screen::TeacherDashboard)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::from_route_name(s).ok_or_else(|| format!("unknown screen: {s}"))
    }
}

/// Parameters carried into a screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteParams {
    /// No parameters.
    #[default]
    None,
    /// Auth screen: which role is signing in.
    Role(Role),
    /// Dashboards and profile completion after verification.
    UserData(Box<VerificationResponse>),
    /// Dashboards reached from profile completion.
    UserId(String),
}

/// A screen plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Destination.
    pub screen: Screen,
    /// Data handed to the destination.
    pub params: RouteParams,
}

impl Route {
    /// Route without parameters.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            params: RouteParams::None,
        }
    }

    /// Route carrying `params`.
    pub fn with_params(screen: Screen, params: RouteParams) -> Self {
        Self { screen, params }
    }

    /// Role parameter, if any.
    pub fn role(&self) -> Option<Role> {
        match self.params {
            RouteParams::Role(role) => Some(role),
            _ => None,
        }
    }

    /// Verification data parameter, if any.
    pub fn user_data(&self) -> Option<&VerificationResponse> {
        match &self.params {
            RouteParams::UserData(data) => Some(data),
            _ => None,
        }
    }
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        Route::new(screen)
    }
}

/// Stack navigation collaborator.
pub trait Navigator {
    /// Push `route` on top of the stack.
    fn navigate(&mut self, route: Route);

    /// Swap the top of the stack for `route`.
    fn replace(&mut self, route: Route);

    /// Pop the top route. No-op on the root.
    fn go_back(&mut self);

    /// Drop the whole stack and start over at `screen`.
    fn reset_to(&mut self, screen: Screen);
}
