use std::env;

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
    #[error("invalid value for {0}")]
    InvalidVar(&'static str),
}

/// Connection settings for the external identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's auth API.
    pub url: String,
    /// Publishable key sent with user-scoped requests.
    pub anon_key: String,
    /// Privileged key sent with admin requests.
    pub service_key: String,
}

/// Process-wide configuration assembled once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Slug used to resolve the public store when no store is flagged default.
    pub default_store_slug: String,
    /// Marks session cookies `Secure`; enable behind TLS.
    pub secure_cookies: bool,
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// `IDENTITY_PROVIDER_URL`, `IDENTITY_ANON_KEY` and `IDENTITY_SERVICE_KEY`
    /// are required; everything else falls back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = env::var("ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidVar("PORT"))?;
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "app.db".to_string());
        let default_store_slug =
            env::var("DEFAULT_STORE_SLUG").unwrap_or_else(|_| "main".to_string());
        let secure_cookies = env::var("SECURE_COOKIES")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let identity = IdentityConfig {
            url: env::var("IDENTITY_PROVIDER_URL")
                .map_err(|_| ConfigError::MissingVar("IDENTITY_PROVIDER_URL"))?,
            anon_key: env::var("IDENTITY_ANON_KEY")
                .map_err(|_| ConfigError::MissingVar("IDENTITY_ANON_KEY"))?,
            service_key: env::var("IDENTITY_SERVICE_KEY")
                .map_err(|_| ConfigError::MissingVar("IDENTITY_SERVICE_KEY"))?,
        };

        Ok(Self {
            address,
            port,
            database_url,
            default_store_slug,
            secure_cookies,
            identity,
        })
    }
}
