//! Auth cookie and token-secret configuration.
//!
//! This module centralises the environment-driven auth settings so they are
//! validated consistently and can be tested in isolation. Release builds
//! require every toggle to be set explicitly; debug builds warn and fall back
//! to defaults.

use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Cookie, SameSite, time};
use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

/// Name of the cookie carrying the signed auth token.
pub const AUTH_COOKIE: &str = "authToken";

const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/auth_token_secret";
const SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "AUTH_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "AUTH_ALLOW_EPHEMERAL_SECRET";
const SECRET_FILE_ENV: &str = "AUTH_TOKEN_SECRET_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for auth configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::cookie_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Attributes of the auth token cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCookieSettings {
    /// Whether the cookie is marked `Secure`.
    pub secure: bool,
    /// Cookie lifetime; matches the token validity window.
    pub max_age: Duration,
}

impl AuthCookieSettings {
    /// Cookie carrying a freshly issued token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use actix_web::cookie::SameSite;
    /// use backend::inbound::http::cookie_config::{AuthCookieSettings, AUTH_COOKIE};
    ///
    /// let settings = AuthCookieSettings { secure: true, max_age: Duration::from_secs(60) };
    /// let cookie = settings.token_cookie("signed.token.value".to_owned());
    /// assert_eq!(cookie.name(), AUTH_COOKIE);
    /// assert_eq!(cookie.http_only(), Some(true));
    /// assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    /// ```
    pub fn token_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        self.base_cookie(token)
            .max_age(time::Duration::seconds(max_age))
            .finish()
    }

    /// Cookie that instructs the client to drop the token.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.base_cookie(String::new())
            .max_age(time::Duration::ZERO)
            .finish()
    }

    fn base_cookie(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        Cookie::build(AUTH_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }
}

/// Auth settings derived from configuration toggles.
pub struct AuthSettings {
    /// HMAC secret used to sign tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
    /// Whether the auth cookie is marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating auth configuration.
#[derive(thiserror::Error, Debug)]
pub enum AuthConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the token secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The token secret is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("AUTH_ALLOW_EPHEMERAL_SECRET must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build auth settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::cookie_config::{auth_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("auth_secret_example");
/// std::fs::write(&secret_path, vec![b'a'; 32])?;
///
/// let secret_path = secret_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(move |name| match name {
///         "AUTH_TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///         "AUTH_COOKIE_SECURE" => Some("1".to_string()),
///         "AUTH_ALLOW_EPHEMERAL_SECRET" => Some("0".to_string()),
///         _ => None,
///     });
///
/// let settings = auth_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn auth_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AuthSettings, AuthConfigError> {
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let token_secret = token_secret_from_env(env, mode, allow_ephemeral)?;

    Ok(AuthSettings {
        token_secret,
        cookie_secure,
    })
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, AuthConfigError> {
    match env.string(COOKIE_SECURE_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None if mode.is_debug() => {
                warn!(value = %value, "invalid AUTH_COOKIE_SECURE; defaulting to secure");
                Ok(true)
            }
            None => Err(AuthConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => {
            warn!("AUTH_COOKIE_SECURE not set; defaulting to secure");
            Ok(true)
        }
        None => Err(AuthConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV,
        }),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, AuthConfigError> {
    match env.string(ALLOW_EPHEMERAL_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(true) if mode.is_debug() => Ok(true),
            Some(true) => Err(AuthConfigError::EphemeralNotAllowed),
            Some(false) => Ok(false),
            None if mode.is_debug() => {
                warn!(
                    value = %value,
                    "invalid AUTH_ALLOW_EPHEMERAL_SECRET; defaulting to disabled"
                );
                Ok(false)
            }
            None => Err(AuthConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => Ok(false),
        None => Err(AuthConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV,
        }),
    }
}

fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, AuthConfigError> {
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < SECRET_MIN_LEN {
                return Err(AuthConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: SECRET_MIN_LEN,
                });
            }
            Ok(bytes)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using ephemeral token secret (dev only); tokens will not survive a restart"
            );
            let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            rand::thread_rng().fill_bytes(secret.as_mut_slice());
            Ok(secret)
        }
        Err(error) => Err(AuthConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
