use std::{env, time::Duration};

use acg_common::Secret;
use log::error;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Default)]
pub struct StorefrontConfig {
    /// Base URL of the storefront's service API, e.g. "https://services.example.com/api/v1"
    pub base_url: String,
    pub access_token: Secret<String>,
    /// Client-level cap on any single request. The registry applies its own, shorter, discount-code timeout on top.
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            access_token: Secret::new(access_token.to_string()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_env_or_default() -> Self {
        let base_url = env::var("ACG_STOREFRONT_URL").ok().unwrap_or_default();
        let access_token = Secret::new(env::var("ACG_STOREFRONT_ACCESS_TOKEN").ok().unwrap_or_default());
        let request_timeout = env::var("ACG_STOREFRONT_TIMEOUT_MS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for ACG_STOREFRONT_TIMEOUT_MS. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        Self { base_url, access_token, request_timeout }
    }
}
