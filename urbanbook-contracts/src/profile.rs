//! Backend verification and profile payloads (snake_case JSON).

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::navigation::Screen;
use crate::role::Role;

/// Body of `POST /api/{role}/validate-token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Token from the identity SDK.
    pub token: String,
}

/// Answer to a token validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationResponse {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Server message, shown on failure.
    pub message: Option<String>,
    /// Backend user id.
    pub user_id: Option<String>,
    /// Role name as the backend spells it.
    pub user_type: Option<String>,
    /// Name on file.
    pub name: Option<String>,
    /// Gender on file.
    pub gender: Option<String>,
    /// Age on file.
    pub age: Option<u32>,
    /// Kind of the primary identifier.
    pub identity_type: Option<String>,
    /// Primary identifier.
    pub identity_value: Option<String>,
    /// Route name of the dashboard to open.
    pub dashboard_route: Option<String>,
    /// Every identifier of the user.
    pub identities: Vec<Identity>,
    /// Server timestamp.
    pub timestamp: Option<String>,
}

impl VerificationResponse {
    /// Role the backend assigned, if it is one we know.
    pub fn role(&self) -> Option<Role> {
        self.user_type.as_deref()?.parse().ok()
    }

    /// Dashboard named by the server, falling back to `fallback`'s.
    pub fn dashboard(&self, fallback: Role) -> Screen {
        match self.dashboard_route.as_deref().map(Screen::from_route_name) {
            Some(Some(screen)) => screen,
            Some(None) => {
                log::warn!(
                    "[Contracts] unknown dashboard route {:?}, using {}",
                    self.dashboard_route,
                    fallback.dashboard()
                );
                fallback.dashboard()
            }
            None => fallback.dashboard(),
        }
    }
}

/// Body of `POST /api/{role}/update-profile/`. Role-specific fields are
/// omitted for the other role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Backend user id from verification.
    pub user_id: String,
    /// Full name.
    pub name: String,
    /// Gender choice.
    pub gender: String,
    /// Age in years.
    pub age: Option<u32>,
    /// Student only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Student only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Teacher only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Teacher only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}

/// Answer to a profile update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdateResponse {
    /// Whether the profile was saved.
    pub success: bool,
    /// Server message, shown on failure.
    pub message: Option<String>,
}
