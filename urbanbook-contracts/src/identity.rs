//! Identity SDK results.
//!
//! The SDK answers with an optional `data` block and an optional
//! `errorMessage`. [`RawIdentityResult`] mirrors that wire shape;
//! [`IdentityResult`] is what the auth flow consumes.

use serde::{Deserialize, Serialize};

/// One verified identifier (phone, email, ...) of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Kind of identifier, such as `phone` or `email`.
    pub identity_type: String,
    /// The identifier itself.
    pub identity_value: String,
    /// Display name attached to the identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the provider verified it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Successful sign-in data from the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityPayload {
    /// Token to validate with the backend.
    pub token: Option<String>,
    /// Provider user id.
    pub user_id: Option<String>,
    /// Identifiers of the user.
    pub identities: Vec<Identity>,
}

impl IdentityPayload {
    /// Token, if present and not blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.trim().is_empty())
    }
}

/// Wire shape of an SDK callback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIdentityResult {
    /// Present on success.
    pub data: Option<IdentityPayload>,
    /// Provider message on failure.
    pub error_message: Option<String>,
}

/// Outcome of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResult {
    /// The SDK returned data.
    Authenticated(IdentityPayload),
    /// Sign-in failed.
    Failed {
        /// Provider's text, if any.
        message: Option<String>,
    },
}

impl From<RawIdentityResult> for IdentityResult {
    fn from(raw: RawIdentityResult) -> Self {
        match raw.data {
            Some(payload) => IdentityResult::Authenticated(payload),
            None => IdentityResult::Failed {
                message: raw.error_message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sdk_success() {
        let raw: RawIdentityResult = serde_json::from_str(
            r#"{"data":{"token":"tkn","userId":"u-1","identities":[
                {"identityType":"phone","identityValue":"+911234567890",
                 "verified":true}]}}"#,
        )
        .expect("decode");
        let IdentityResult::Authenticated(payload) = raw.into() else {
            panic!("expected authenticated result");
        };
        assert_eq!(payload.token(), Some("tkn"));
        assert_eq!(payload.identities[0].identity_type, "phone");
        assert_eq!(payload.identities[0].name, None);
    }

    #[test]
    fn missing_data_is_a_failure() {
        let raw: RawIdentityResult =
            serde_json::from_str(r#"{"errorMessage":"cancelled"}"#)
                .expect("decode");
        assert_eq!(
            IdentityResult::from(raw),
            IdentityResult::Failed {
                message: Some("cancelled".to_string())
            }
        );
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let payload = IdentityPayload {
            token: Some("  ".to_string()),
            ..IdentityPayload::default()
        };
        assert_eq!(payload.token(), None);
    }
}
