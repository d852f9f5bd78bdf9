// SPDX-License-Identifier: AGPL-3.0-or-later

//! Token claims and the authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// Tokens are self-contained: identity and role travel in the token, so
/// protected requests need no store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username of the authenticated user
    pub name: String,
    /// Primary role at login time (first assigned role; empty string when
    /// the user has no roles)
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the type handlers receive for the request's caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Username (the token's `name` claim)
    pub username: String,
    /// Role claim, compared case-sensitively by role gates
    pub role: String,
}

impl AuthenticatedUser {
    /// Build from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            username: claims.name,
            role: claims.role,
        }
    }
}
