// SPDX-License-Identifier: AGPL-3.0-or-later

//! Axum extractors for authenticated routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::claims::AuthenticatedUser;
use crate::auth::error::AuthError;
use crate::state::AppState;

const ADMIN_ROLE: &str = "Admin";

/// Check that `user` holds exactly the required role.
///
/// Comparison is case sensitive: "admin" does not satisfy "Admin".
pub fn require_role(user: &AuthenticatedUser, required: &str) -> Result<(), AuthError> {
    if user.role == required {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get("authorization")
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

fn authenticate(parts: &mut Parts, state: &AppState) -> Result<AuthenticatedUser, AuthError> {
    // Tests and middleware can pre-authenticate a request by inserting
    // the user into request extensions.
    if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
        return Ok(user.clone());
    }

    let token = bearer_token(parts)?;
    let claims = state.auth.verify(token)?;
    Ok(AuthenticatedUser::from_claims(claims))
}

/// Extractor that requires a valid bearer token.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(Auth)
    }
}

/// Extractor that requires a valid bearer token with the Admin role.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state)?;
        require_role(&user, ADMIN_ROLE)?;
        Ok(AdminOnly(user))
    }
}
