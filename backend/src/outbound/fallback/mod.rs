//! Repositories that prefer the primary database and degrade to memory.
//!
//! Each call goes to the primary backend while the shared [`BackendStatus`]
//! reports [`BackendMode::Primary`]. A connection-class failure flips the
//! status to fallback (logged once at `warn`) and the call is served from
//! the in-memory store. Query failures are returned unchanged. The switch is
//! one-way: writes made in memory would be invisible after a return to the
//! primary.

mod course_repository;
mod credential_repository;

pub use course_repository::FallbackCourseRepository;
pub use credential_repository::FallbackCredentialRepository;

use std::fmt::Display;

use tracing::warn;

use crate::domain::{BackendMode, BackendStatus, TraceId};

/// Route one port call through the primary or the memory store.
macro_rules! route_call {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {{
        if $self.status.mode() == $crate::domain::BackendMode::Primary {
            match $self.primary.$method($($arg),*).await {
                Err(error) if $crate::domain::ports::StorageFailure::is_connection(&error) => {
                    $crate::outbound::fallback::degrade(&$self.status, stringify!($method), &error);
                }
                outcome => return outcome,
            }
        }
        $self.memory.$method($($arg),*).await
    }};
}

pub(crate) use route_call;

pub(crate) fn degrade(status: &BackendStatus, operation: &str, error: &dyn Display) {
    if status.switch_to_fallback() {
        warn!(
            operation,
            error = %error,
            trace_id = ?TraceId::current(),
            storage = %BackendMode::Fallback,
            "primary storage unreachable; switching to in-memory fallback"
        );
    }
}
