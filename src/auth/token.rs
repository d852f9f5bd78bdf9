// SPDX-License-Identifier: AGPL-3.0-or-later

//! JWT issuance and verification.
//!
//! Tokens are signed with HS256 and carry the username and a single role
//! claim. Expiry is checked manually against the injected [`Clock`] so
//! tests can cross the expiry boundary without sleeping.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::TokenClaims;
use crate::auth::clock::Clock;
use crate::auth::error::AuthError;

/// Token lifetime in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Signing context shared across the application.
#[derive(Clone)]
pub struct AuthContext {
    secret: Arc<str>,
    clock: Clock,
}

impl AuthContext {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
            clock: Clock::System,
        }
    }

    /// Use a fixed clock instead of the system clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Issue a signed token for `username` with the given role claim.
    pub fn issue(&self, username: &str, role: &str) -> Result<String, AuthError> {
        let now = self.clock.now();
        let claims = TokenClaims {
            name: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Every failure mode (malformed token, wrong signature, expired)
    /// maps to [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced below against the injected clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_context(secret: &str) -> AuthContext {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        AuthContext::new(secret).with_clock(Clock::Fixed(now))
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let ctx = fixed_context("test-secret");
        let token = ctx.issue("admin@site.com", "Admin").unwrap();
        let claims = ctx.verify(&token).unwrap();
        assert_eq!(claims.name, "admin@site.com");
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn expiry_is_seven_days() {
        let ctx = fixed_context("test-secret");
        let token = ctx.issue("admin@site.com", "Admin").unwrap();
        let claims = ctx.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_valid_just_before_expiry() {
        let issued_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let ctx = AuthContext::new("test-secret").with_clock(Clock::Fixed(issued_at));
        let token = ctx.issue("user@site.com", "Admin").unwrap();

        let almost_expired = issued_at + Duration::days(7) - Duration::seconds(1);
        let later = AuthContext::new("test-secret").with_clock(Clock::Fixed(almost_expired));
        assert!(later.verify(&token).is_ok());
    }

    #[test]
    fn token_rejected_at_expiry() {
        let issued_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let ctx = AuthContext::new("test-secret").with_clock(Clock::Fixed(issued_at));
        let token = ctx.issue("user@site.com", "Admin").unwrap();

        let expired = issued_at + Duration::days(7);
        let later = AuthContext::new("test-secret").with_clock(Clock::Fixed(expired));
        assert!(matches!(later.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_rejected() {
        let ctx = fixed_context("secret-a");
        let token = ctx.issue("user@site.com", "Admin").unwrap();

        let other = fixed_context("secret-b");
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn malformed_token_rejected() {
        let ctx = fixed_context("test-secret");
        assert!(matches!(ctx.verify("not.a.jwt"), Err(AuthError::InvalidToken)));
        assert!(matches!(ctx.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let ctx = fixed_context("test-secret");
        let token = ctx.issue("user@site.com", "User").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        claims["role"] = "Admin".into();
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert!(matches!(ctx.verify(&forged), Err(AuthError::InvalidToken)));
    }
}
