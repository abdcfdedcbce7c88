//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use backend::domain::DefaultAdmin;
use backend::inbound::http::cookie_config::AuthSettings;

use super::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) auth: AuthSettings,
    pub(crate) default_admin: DefaultAdmin,
    pub(crate) token_ttl: Duration,
    pub(crate) list_cache_ttl: Duration,
    pub(crate) database_url: Option<String>,
}

impl ServerConfig {
    /// Construct a memory-only configuration with default lifetimes.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, auth: AuthSettings, default_admin: DefaultAdmin) -> Self {
        Self {
            bind_addr,
            auth,
            default_admin,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            list_cache_ttl: Duration::from_secs(10),
            database_url: None,
        }
    }

    /// Combine loaded settings with the auth secret and cookie policy.
    pub fn from_settings(settings: &AppSettings, auth: AuthSettings) -> Result<Self, SettingsError> {
        let config = Self::new(settings.bind_addr()?, auth, settings.default_admin()?)
            .with_token_ttl(settings.token_ttl())
            .with_list_cache_ttl(settings.list_cache_ttl());
        Ok(match settings.database_url() {
            Some(url) => config.with_database_url(url),
            None => config,
        })
    }

    /// Use PostgreSQL as primary storage, falling back to memory on failure.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_list_cache_ttl(mut self, ttl: Duration) -> Self {
        self.list_cache_ttl = ttl;
        self
    }
}
