//! Contracts between UrbanBook screens and their collaborators.
//!
//! Screens talk to navigation through [`navigation::Navigator`], receive
//! identity SDK results as [`identity::IdentityResult`] and exchange the
//! verification and profile payloads in [`profile`] with the backend.

pub mod identity;
pub mod navigation;
pub mod profile;
pub mod role;

/// Frequently used contract types for screen and flow code.
pub mod prelude {
    pub use super::identity::{
        Identity, IdentityPayload, IdentityResult, RawIdentityResult,
    };
    pub use super::navigation::{Navigator, Route, RouteParams, Screen};
    pub use super::profile::{
        ProfileUpdate, ProfileUpdateResponse, VerificationRequest,
        VerificationResponse,
    };
    pub use super::role::{Role, UnknownRole};
}
