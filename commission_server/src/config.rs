use std::{env, time::Duration};

use log::error;
use storefront_link::StorefrontConfig;

const DEFAULT_ACG_HOST: &str = "127.0.0.1";
const DEFAULT_ACG_PORT: u16 = 8420;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/commission_store.db";
const DEFAULT_DISCOUNT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long order ingestion will wait on the discount-code issuer before registering an affiliate without a
    /// code.
    pub discount_timeout: Duration,
    /// Capacity of the fire-and-forget event channels (welcome notifications, payout tasks).
    pub event_buffer_size: usize,
    /// Storefront collaborator configuration (discount codes, notifications, payout queue).
    pub storefront: StorefrontConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_ACG_HOST.to_string(),
            port: DEFAULT_ACG_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            discount_timeout: DEFAULT_DISCOUNT_TIMEOUT,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            storefront: StorefrontConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("ACG_HOST").ok().unwrap_or_else(|| DEFAULT_ACG_HOST.into());
        let port = env::var("ACG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for ACG_PORT. {e} Using the default, {DEFAULT_ACG_PORT}, instead."
                    );
                    DEFAULT_ACG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_ACG_PORT);
        let database_url = env::var("ACG_DATABASE_URL").ok().unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let discount_timeout = env::var("ACG_DISCOUNT_TIMEOUT_MS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for ACG_DISCOUNT_TIMEOUT_MS. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DISCOUNT_TIMEOUT);
        let event_buffer_size = env::var("ACG_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let storefront = StorefrontConfig::from_env_or_default();
        Self { host, port, database_url, discount_timeout, event_buffer_size, storefront }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8420);
        assert_eq!(config.discount_timeout, Duration::from_secs(2));
    }
}
