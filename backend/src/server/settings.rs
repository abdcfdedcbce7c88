//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from CLI flags, `CATALOG_*` environment variables, or
//! a configuration file. Unset values take the defaults declared on each field.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use backend::domain::{DefaultAdmin, Username};

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid default admin username: {0}")]
    AdminUsername(String),
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// PostgreSQL URL. Without one the catalogue runs from memory.
    pub database_url: Option<String>,
    /// Lifetime of issued tokens and the auth cookie, in hours.
    #[ortho_config(default = 24)]
    pub token_ttl_hours: u64,
    /// Freshness window of the course list cache, in seconds.
    #[ortho_config(default = 10)]
    pub list_cache_secs: u64,
    #[ortho_config(default = "admin".to_owned())]
    pub admin_username: String,
    #[ortho_config(default = "admin123".to_owned())]
    pub admin_password: String,
    #[ortho_config(default = "admin@miscareer.com".to_owned())]
    pub admin_email: String,
    #[ortho_config(default = "Admin User".to_owned())]
    pub admin_name: String,
}

impl AppSettings {
    /// Load settings from the process arguments, environment, and files.
    pub fn from_process() -> Result<Self, SettingsError> {
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load(err.to_string()))
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                message: err.to_string(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_hours.saturating_mul(60 * 60))
    }

    pub fn list_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_secs)
    }

    /// Identity seeded into every credential store.
    pub fn default_admin(&self) -> Result<DefaultAdmin, SettingsError> {
        let username = Username::new(&self.admin_username)
            .map_err(|err| SettingsError::AdminUsername(err.to_string()))?;
        Ok(DefaultAdmin {
            username,
            password: Zeroizing::new(self.admin_password.clone()),
            email: self.admin_email.clone(),
            name: self.admin_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "CATALOG_BIND_ADDR",
        "CATALOG_DATABASE_URL",
        "CATALOG_TOKEN_TTL_HOURS",
        "CATALOG_LIST_CACHE_SECS",
        "CATALOG_ADMIN_USERNAME",
        "CATALOG_ADMIN_PASSWORD",
        "CATALOG_ADMIN_EMAIL",
        "CATALOG_ADMIN_NAME",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::from_args([OsString::from("catalogue-server")]).expect("config should load")
    }

    fn defaults() -> AppSettings {
        AppSettings {
            bind_addr: "0.0.0.0:8080".to_owned(),
            database_url: None,
            token_ttl_hours: 24,
            list_cache_secs: 10,
            admin_username: "admin".to_owned(),
            admin_password: "admin123".to_owned(),
            admin_email: "admin@miscareer.com".to_owned(),
            admin_name: "Admin User".to_owned(),
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.token_ttl(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(settings.list_cache_ttl(), Duration::from_secs(10));

        let admin = settings.default_admin().expect("default admin");
        assert_eq!(admin.username.as_ref(), "admin");
        assert_eq!(admin.password.as_str(), "admin123");
        assert_eq!(admin.email, "admin@miscareer.com");
        assert_eq!(admin.name, "Admin User");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOG_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "CATALOG_DATABASE_URL",
                Some("postgres://localhost/catalogue".to_owned()),
            ),
            ("CATALOG_TOKEN_TTL_HOURS", Some("2".to_owned())),
            ("CATALOG_LIST_CACHE_SECS", Some("0".to_owned())),
            ("CATALOG_ADMIN_USERNAME", Some("root".to_owned())),
            ("CATALOG_ADMIN_PASSWORD", None::<String>),
            ("CATALOG_ADMIN_EMAIL", None::<String>),
            ("CATALOG_ADMIN_NAME", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/catalogue")
        );
        assert_eq!(settings.token_ttl(), Duration::from_secs(2 * 60 * 60));
        assert_eq!(settings.list_cache_ttl(), Duration::ZERO);
        assert_eq!(
            settings.default_admin().expect("admin").username.as_ref(),
            "root"
        );
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(Some(""))]
    #[case(None)]
    fn blank_database_url_means_memory_only(#[case] url: Option<&str>) {
        let settings = AppSettings {
            database_url: url.map(str::to_owned),
            ..defaults()
        };
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_admin_username_is_rejected(#[case] username: &str) {
        let settings = AppSettings {
            admin_username: username.to_owned(),
            ..defaults()
        };
        assert!(matches!(
            settings.default_admin(),
            Err(SettingsError::AdminUsername(_))
        ));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = AppSettings {
            bind_addr: "not-an-addr".to_owned(),
            ..defaults()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
