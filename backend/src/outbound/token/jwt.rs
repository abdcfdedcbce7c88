//! HS256 JSON Web Token implementation of the `TokenCodec` port.
//!
//! Claims carry `sub` (username), `iat`, and `exp` as Unix seconds. Expiry is
//! checked against the caller-supplied instant rather than the system clock,
//! with no leeway.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{AuthToken, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Token codec signing with a shared HMAC secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: TimeDelta,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Build a codec from a secret and a validity window.
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validity: TimeDelta::from_std(validity).unwrap_or(TimeDelta::MAX),
            validation,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        username: &Username,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthToken, TokenCodecError> {
        let expires_at = issued_at
            .checked_add_signed(self.validity)
            .ok_or_else(|| TokenCodecError::signing("token expiry out of range"))?;
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenCodecError::signing(err.to_string()))?;
        Ok(AuthToken::new(token, expires_at))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Username, TokenCodecError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenCodecError::invalid(err.to_string()))?;
        if data.claims.exp <= now.timestamp() {
            return Err(TokenCodecError::expired());
        }
        Username::new(&data.claims.sub).map_err(|err| TokenCodecError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"test-secret-with-enough-entropy";

    #[fixture]
    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new(SECRET, Duration::from_secs(24 * 60 * 60))
    }

    fn admin() -> Username {
        Username::new("admin").expect("valid username")
    }

    #[rstest]
    fn issued_token_verifies_within_window(codec: JwtTokenCodec, issued_at: DateTime<Utc>) {
        let token = codec.issue(&admin(), issued_at).expect("issue");

        assert_eq!(token.expires_at(), issued_at + TimeDelta::hours(24));
        let subject = codec
            .verify(token.as_str(), issued_at + TimeDelta::hours(23))
            .expect("verify");
        assert_eq!(subject, admin());
    }

    #[rstest]
    #[case(TimeDelta::hours(24))]
    #[case(TimeDelta::hours(25))]
    fn expired_tokens_are_rejected(
        codec: JwtTokenCodec,
        issued_at: DateTime<Utc>,
        #[case] age: TimeDelta,
    ) {
        let token = codec.issue(&admin(), issued_at).expect("issue");
        assert_eq!(
            codec.verify(token.as_str(), issued_at + age),
            Err(TokenCodecError::expired())
        );
    }

    #[rstest]
    fn tokens_from_another_secret_are_invalid(codec: JwtTokenCodec, issued_at: DateTime<Utc>) {
        let foreign = JwtTokenCodec::new(b"another-secret", Duration::from_secs(60));
        let token = foreign.issue(&admin(), issued_at).expect("issue");

        let error = codec
            .verify(token.as_str(), issued_at)
            .expect_err("signature mismatch");
        assert!(matches!(error, TokenCodecError::Invalid { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case("a.b.c")]
    fn malformed_tokens_are_invalid(
        codec: JwtTokenCodec,
        issued_at: DateTime<Utc>,
        #[case] token: &str,
    ) {
        let error = codec.verify(token, issued_at).expect_err("malformed");
        assert!(matches!(error, TokenCodecError::Invalid { .. }));
    }
}
