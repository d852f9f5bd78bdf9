// SPDX-License-Identifier: AGPL-3.0-or-later

//! Registration and login orchestration.
//!
//! Registration validates in stages (uniqueness, username shape, role
//! name, then password policy); the policy stage reports every violated
//! rule at once. Login collapses unknown-username and wrong-password
//! into the same outcome so callers cannot probe which usernames exist.

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::policy;
use crate::auth::token::AuthContext;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::storage::{
    FileStorage, RoleRepository, StorageError, StoredUser, UserRepository,
};

/// Registration failure.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// Request rejected with one or more validation messages
    #[error("registration rejected")]
    Rejected(Vec<String>),
    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Login failure. Bad credentials are not an error; they surface as
/// `Ok(None)` from [`login`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to issue token: {0}")]
    Token(String),
}

const DUPLICATE_USERNAME: &str = "username already exists.";
const INVALID_USERNAME: &str = "username must be a valid email.";
const INVALID_ROLE: &str = "role name may only contain letters, digits, '-' and '_'.";

fn valid_email(username: &str) -> bool {
    let Some((local, domain)) = username.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));
    let domain_ok = domain.contains('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
    local_ok && domain_ok
}

fn valid_role_name(role: &str) -> bool {
    !role.is_empty()
        && role
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

/// Register a new user.
///
/// The role is ensured in the role registry before the user record is
/// written; the record itself is one atomic write with the role inline,
/// so a created user always has its role.
pub fn register(
    storage: &FileStorage,
    request: &RegisterRequest,
) -> Result<UserResponse, RegisterError> {
    let users = UserRepository::new(storage);
    let username = request.username.trim();

    // Fast path only; the store-level index is the real constraint.
    if users.find_by_username(username)?.is_some() {
        return Err(RegisterError::Rejected(vec![DUPLICATE_USERNAME.to_string()]));
    }

    if !valid_email(username) {
        return Err(RegisterError::Rejected(vec![INVALID_USERNAME.to_string()]));
    }

    if !valid_role_name(&request.role) {
        return Err(RegisterError::Rejected(vec![INVALID_ROLE.to_string()]));
    }

    let violations = policy::validate_password(&request.password);
    if !violations.is_empty() {
        return Err(RegisterError::Rejected(violations));
    }

    let password_hash = password::hash_password(&request.password)
        .map_err(|e| RegisterError::Storage(StorageError::Io(std::io::Error::other(e))))?;

    RoleRepository::new(storage).ensure(&request.role)?;

    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        display_name: request.display_name.trim().to_string(),
        password_hash,
        roles: vec![request.role.clone()],
        created_at: Utc::now(),
    };

    match users.create(&user) {
        Ok(()) => Ok(user.into()),
        Err(StorageError::AlreadyExists(_)) => {
            // Lost a race with a concurrent registration of the same name.
            Err(RegisterError::Rejected(vec![DUPLICATE_USERNAME.to_string()]))
        }
        Err(e) => Err(e.into()),
    }
}

/// Attempt a login. Returns `Ok(None)` for unknown username or wrong
/// password, with no distinction between the two.
pub fn login(
    storage: &FileStorage,
    auth: &AuthContext,
    request: &LoginRequest,
) -> Result<Option<LoginResponse>, LoginError> {
    let users = UserRepository::new(storage);

    let Some(user) = users.find_by_username(&request.username)? else {
        return Ok(None);
    };

    if !password::verify_password(&request.password, &user.password_hash) {
        return Ok(None);
    }

    // The first role in stored order becomes the token's role claim.
    let role = user.roles.first().cloned().unwrap_or_default();
    let token = auth
        .issue(&user.username, &role)
        .map_err(|e| LoginError::Token(e.to_string()))?;

    Ok(Some(LoginResponse {
        token,
        user: user.into(),
    }))
}
