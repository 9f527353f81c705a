use std::sync::Arc;
use std::time::Duration;

use urbanbook_carousel::CarouselOverrides;

use crate::infra::constants::{env, identity, server, welcome};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_url: Arc<str>,
    pub identity_app_id: Arc<str>,
    /// How long the welcome demo runs before unmounting.
    pub demo_duration: Duration,
    pub carousel: CarouselOverrides,
}

impl AppConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: Arc::from(server_url.into()),
            identity_app_id: Arc::from(identity::DEFAULT_APP_ID),
            demo_duration: Duration::from_secs(welcome::DEMO_SECS),
            carousel: CarouselOverrides::new(),
        }
    }

    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(env::SERVER_URL)
            .unwrap_or_else(|| server::DEFAULT_SERVER_URL.to_string());
        let identity_app_id = lookup(env::IDENTITY_APP_ID)
            .unwrap_or_else(|| identity::DEFAULT_APP_ID.to_string());
        let demo_secs = match lookup(env::DEMO_SECS) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "[AppConfig] ignoring {}={:?}, using {}s",
                    env::DEMO_SECS,
                    raw,
                    welcome::DEMO_SECS
                );
                welcome::DEMO_SECS
            }),
            None => welcome::DEMO_SECS,
        };

        Self {
            server_url: Arc::from(server_url),
            identity_app_id: Arc::from(identity_app_id),
            demo_duration: Duration::from_secs(demo_secs),
            carousel: CarouselOverrides::from_lookup(&lookup),
        }
    }
}
