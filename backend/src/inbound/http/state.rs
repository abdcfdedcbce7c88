//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::BackendStatus;
use crate::domain::ports::{
    CourseCommand, CourseQuery, LoginService, UserAdminCommand, UsersQuery,
};

use super::cookie_config::AuthCookieSettings;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use backend::domain::{BackendMode, BackendStatus};
/// use backend::inbound::http::cookie_config::AuthCookieSettings;
/// use backend::inbound::http::state::HttpState;
///
/// fn with_status(state: HttpState) -> HttpState {
///     HttpState {
///         status: Arc::new(BackendStatus::new(BackendMode::Primary)),
///         cookie: AuthCookieSettings {
///             secure: true,
///             max_age: Duration::from_secs(86_400),
///         },
///         ..state
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub user_admin: Arc<dyn UserAdminCommand>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    /// Storage backend currently serving requests.
    pub status: Arc<BackendStatus>,
    /// Attributes applied to the auth token cookie.
    pub cookie: AuthCookieSettings,
}
