use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use urbanbook_contracts::prelude::{
    ProfileUpdate, ProfileUpdateResponse, Role, VerificationRequest,
    VerificationResponse,
};

use crate::error::ApiError;
use crate::infra::constants::server;

/// Account endpoints the onboarding flows depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Exchange an identity token for the backend's view of the user.
    async fn verify_token(
        &self,
        role: Role,
        token: String,
    ) -> Result<VerificationResponse, ApiError>;

    async fn update_profile(
        &self,
        role: Role,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdateResponse, ApiError>;
}

/// HTTP client for the UrbanBook backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Add a scheme when missing and drop trailing slashes so endpoint paths
/// join cleanly.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let normalized = if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
    {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    if normalized != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, normalized
        );
    }
    normalized
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(server::REQUEST_TIMEOUT_SECS))
            .build()?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{role}/{action}/`
    pub fn endpoint(&self, role: Role, action: &str) -> String {
        format!(
            "{}/api/{}/{}/",
            self.base_url,
            role.api_segment(),
            action.trim_matches('/')
        )
    }

    /// POST `body` as JSON and decode a JSON answer.
    ///
    /// JSON bodies are decoded whatever the status, since the backend
    /// reports refusals as `{success: false, message}`. Anything else is an
    /// error.
    async fn post_json<T, R>(&self, url: &str, body: &T) -> Result<R, ApiError>
    where
        T: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        debug!("[ApiClient] POST {}", url);
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));

        if !is_json {
            if status.is_success() {
                return Err(ApiError::NotJson {
                    status: status.as_u16(),
                    content_type,
                });
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            warn!("[ApiClient] {} answered {}", url, status);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AccountService for ApiClient {
    async fn verify_token(
        &self,
        role: Role,
        token: String,
    ) -> Result<VerificationResponse, ApiError> {
        let url = self.endpoint(role, "validate-token");
        self.post_json(&url, &VerificationRequest { token }).await
    }

    async fn update_profile(
        &self,
        role: Role,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdateResponse, ApiError> {
        let url = self.endpoint(role, "update-profile");
        self.post_json(&url, &update).await
    }
}
