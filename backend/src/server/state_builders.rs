//! Builders for HTTP state: storage selection, repository wiring, and seeding.

use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::ports::{
    CourseRepository, CredentialRepository, TokenCodec, UserAdminCommand,
};
use backend::domain::{
    AuthService, BackendMode, BackendStatus, CourseCatalogueService, DefaultAdmin, Error,
};
use backend::inbound::http::cookie_config::AuthCookieSettings;
use backend::inbound::http::state::HttpState;
use backend::outbound::fallback::{FallbackCourseRepository, FallbackCredentialRepository};
use backend::outbound::memory::{InMemoryCourseRepository, InMemoryCredentialRepository};
use backend::outbound::password::BcryptPasswordHasher;
use backend::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselCredentialRepository, PoolConfig, run_migrations,
};
use backend::outbound::token::JwtTokenCodec;

use super::ServerConfig;

const PRIMARY_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared pieces every service pair is built from.
struct Wiring {
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    default_admin: DefaultAdmin,
    list_cache_ttl: Duration,
    cookie: AuthCookieSettings,
}

impl Wiring {
    fn auth<R>(&self, credentials: Arc<R>) -> Arc<AuthService<R, BcryptPasswordHasher>>
    where
        R: CredentialRepository + 'static,
    {
        Arc::new(AuthService::new(
            credentials,
            self.hasher.clone(),
            self.tokens.clone(),
            self.clock.clone(),
            self.default_admin.clone(),
        ))
    }

    fn state<R, C>(
        &self,
        credentials: Arc<R>,
        courses: Arc<C>,
        status: Arc<BackendStatus>,
    ) -> HttpState
    where
        R: CredentialRepository + 'static,
        C: CourseRepository + 'static,
    {
        let auth = self.auth(credentials);
        let catalogue = Arc::new(CourseCatalogueService::new(
            courses,
            self.clock.clone(),
            self.list_cache_ttl,
        ));
        HttpState {
            login: auth.clone(),
            users: auth.clone(),
            user_admin: auth,
            courses: catalogue.clone(),
            courses_query: catalogue,
            status,
            cookie: self.cookie,
        }
    }
}

/// Connect, probe, and migrate the primary database.
///
/// Returns `None` when any step fails so the server starts on memory alone.
async fn connect_primary(database_url: &str) -> Option<DbPool> {
    let config = PoolConfig::new(database_url).with_connection_timeout(PRIMARY_CONNECT_TIMEOUT);
    let pool = match DbPool::new(config).await {
        Ok(pool) => pool,
        Err(error) => {
            warn!(%error, "primary storage pool unavailable; running in memory");
            return None;
        }
    };
    if let Err(error) = pool.probe().await {
        warn!(%error, "primary storage probe failed; running in memory");
        return None;
    }
    if let Err(error) = run_migrations(database_url).await {
        warn!(%error, "primary storage migrations failed; running in memory");
        return None;
    }
    Some(pool)
}

fn seed_failure(error: Error) -> std::io::Error {
    std::io::Error::other(format!("seeding default admin failed: {error}"))
}

/// Build the HTTP state, preferring PostgreSQL when configured and reachable.
///
/// The in-memory credential store is always seeded with the default admin so
/// logins keep working after a switch to fallback storage.
pub(crate) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let wiring = Wiring {
        hasher: Arc::new(BcryptPasswordHasher::default()),
        tokens: Arc::new(JwtTokenCodec::new(&config.auth.token_secret, config.token_ttl)),
        clock: Arc::new(DefaultClock),
        default_admin: config.default_admin.clone(),
        list_cache_ttl: config.list_cache_ttl,
        cookie: AuthCookieSettings {
            secure: config.auth.cookie_secure,
            max_age: config.token_ttl,
        },
    };

    let memory_credentials = Arc::new(InMemoryCredentialRepository::new());
    let memory_courses = Arc::new(InMemoryCourseRepository::new());
    wiring
        .auth(memory_credentials.clone())
        .ensure_default_admin()
        .await
        .map_err(seed_failure)?;

    let primary = match config.database_url.as_deref() {
        Some(url) => connect_primary(url).await,
        None => {
            info!("no database configured; running in memory");
            None
        }
    };

    let state = match primary {
        Some(pool) => {
            let status = Arc::new(BackendStatus::new(BackendMode::Primary));
            let credentials = Arc::new(FallbackCredentialRepository::new(
                Arc::new(DieselCredentialRepository::new(pool.clone())),
                memory_credentials,
                status.clone(),
            ));
            let courses = Arc::new(FallbackCourseRepository::new(
                Arc::new(DieselCourseRepository::new(pool)),
                memory_courses,
                status.clone(),
            ));
            wiring.state(credentials, courses, status)
        }
        None => wiring.state(
            memory_credentials,
            memory_courses,
            Arc::new(BackendStatus::new(BackendMode::Fallback)),
        ),
    };

    state
        .user_admin
        .ensure_default_admin()
        .await
        .map_err(seed_failure)?;
    info!(storage = %state.status.mode(), "storage ready");
    Ok(state)
}
