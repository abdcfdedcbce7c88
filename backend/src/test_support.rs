//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests or
//! with the `test-support` feature.

pub mod clock {
    //! Controllable clock for time-dependent behaviour.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// Clock whose reading only moves when a test advances it.
    #[derive(Debug)]
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod app {
    //! In-memory catalogue wiring for HTTP tests.
    //!
    //! Builds the same services the server uses, backed by the in-memory
    //! repositories, a fixed token secret, and a low bcrypt cost.

    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};
    use mockable::Clock;
    use zeroize::Zeroizing;

    use super::clock::MutableClock;
    use crate::domain::ports::{TokenCodec, UserAdminCommand};
    use crate::domain::{
        AuthService, BackendMode, BackendStatus, CourseCatalogueService, DefaultAdmin, Username,
    };
    use crate::inbound::http::cookie_config::AuthCookieSettings;
    use crate::inbound::http::state::HttpState;
    use crate::outbound::memory::{InMemoryCourseRepository, InMemoryCredentialRepository};
    use crate::outbound::password::BcryptPasswordHasher;
    use crate::outbound::token::JwtTokenCodec;

    pub const ADMIN_USERNAME: &str = "admin";
    pub const ADMIN_PASSWORD: &str = "admin123";
    pub const TOKEN_SECRET: &[u8] = b"catalogue-test-secret-catalogue-test-secret";
    pub const TOKEN_VALIDITY: Duration = Duration::from_secs(24 * 60 * 60);

    /// Fixed starting instant shared by HTTP tests.
    pub fn fixed_now() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single() {
            Some(now) => now,
            None => panic!("valid fixture timestamp"),
        }
    }

    pub fn default_admin() -> DefaultAdmin {
        let username = match Username::new(ADMIN_USERNAME) {
            Ok(username) => username,
            Err(error) => panic!("fixture username: {error}"),
        };
        DefaultAdmin {
            username,
            password: Zeroizing::new(ADMIN_PASSWORD.to_owned()),
            email: "admin@miscareer.com".to_owned(),
            name: "Admin User".to_owned(),
        }
    }

    /// Handles to the state backing a test application.
    pub struct TestCatalogue {
        pub state: HttpState,
        pub clock: Arc<MutableClock>,
        pub tokens: Arc<JwtTokenCodec>,
    }

    impl TestCatalogue {
        /// Build an in-memory catalogue with the default admin seeded.
        pub async fn seeded(cache_ttl: Duration) -> Self {
            let clock = Arc::new(MutableClock::new(fixed_now()));
            let dyn_clock: Arc<dyn Clock> = clock.clone();
            let tokens = Arc::new(JwtTokenCodec::new(TOKEN_SECRET, TOKEN_VALIDITY));
            let dyn_tokens: Arc<dyn TokenCodec> = tokens.clone();

            let auth = Arc::new(AuthService::new(
                Arc::new(InMemoryCredentialRepository::new()),
                Arc::new(BcryptPasswordHasher::with_cost(4)),
                dyn_tokens,
                dyn_clock.clone(),
                default_admin(),
            ));
            if let Err(error) = auth.ensure_default_admin().await {
                panic!("seeding default admin: {error}");
            }
            let courses = Arc::new(CourseCatalogueService::new(
                Arc::new(InMemoryCourseRepository::new()),
                dyn_clock,
                cache_ttl,
            ));

            let state = HttpState {
                login: auth.clone(),
                users: auth.clone(),
                user_admin: auth,
                courses: courses.clone(),
                courses_query: courses,
                status: Arc::new(BackendStatus::new(BackendMode::Fallback)),
                cookie: AuthCookieSettings {
                    secure: false,
                    max_age: TOKEN_VALIDITY,
                },
            };
            Self {
                state,
                clock,
                tokens,
            }
        }

        /// Issue a valid token for `username` at the current test instant.
        pub fn token_for(&self, username: &str) -> String {
            let username = match Username::new(username) {
                Ok(username) => username,
                Err(error) => panic!("fixture username: {error}"),
            };
            match self.tokens.issue(&username, self.clock.utc()) {
                Ok(token) => token.into_string(),
                Err(error) => panic!("issuing fixture token: {error}"),
            }
        }
    }
}
