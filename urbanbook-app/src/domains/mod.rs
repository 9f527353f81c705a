//! Onboarding screens, one module per screen.

pub mod auth;
pub mod dashboard;
pub mod navigation;
pub mod profile;
pub mod role_selection;
pub mod welcome;
