//! Port for issuing and verifying signed auth tokens.
use chrono::{DateTime, Utc};

use crate::domain::{AuthToken, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codec adapters.
    pub enum TokenCodecError {
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Token is malformed, tampered with, or signed with another key.
        Invalid { message: String } => "token is invalid: {message}",
        /// Token expiry has passed.
        Expired => "token has expired",
    }
}

/// Signs and verifies time-limited tokens naming a user.
///
/// Time is passed in so callers control the clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token for `username`, valid from `issued_at` for the codec's
    /// configured window.
    fn issue(
        &self,
        username: &Username,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthToken, TokenCodecError>;

    /// Verify `token` at instant `now`, returning the subject.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Username, TokenCodecError>;
}
