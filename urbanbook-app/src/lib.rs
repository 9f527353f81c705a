//! UrbanBook onboarding shell.
//!
//! Screens are modelled as plain state types driven by the host: the
//! welcome and role selection carousels run on `urbanbook-carousel`, the
//! auth and profile flows talk to the backend through [`AccountService`]
//! and move between screens through a
//! [`Navigator`](urbanbook_contracts::navigation::Navigator).

pub mod app;
pub mod domains;
pub mod error;
pub mod infra;

pub use app::AppConfig;
pub use domains::auth::{AuthFlow, AuthStatus, IdentityProvider};
pub use domains::navigation::NavigationStack;
pub use domains::profile::{ProfileForm, ProfileFormFields};
pub use error::{ApiError, AuthFlowError, ProfileFormError};
pub use infra::api_client::{AccountService, ApiClient};
