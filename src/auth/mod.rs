// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Authentication Module
//!
//! Account registration, login and route protection:
//!
//! - **Password policy** ([`policy`]): composition rules, evaluated as a
//!   whole so every violation is reported at once.
//! - **Password hashing** ([`password`]): Argon2id, PHC string format.
//! - **Tokens** ([`token`]): HS256 JWTs carrying `{name, role}`, valid
//!   for seven days. Expiry is checked against an injectable [`Clock`].
//! - **Extractors** ([`extractor`]): [`Auth`] for any authenticated
//!   caller, [`AdminOnly`] for Admin-gated routes.
//! - **Services** ([`service`]): registration and login orchestration.

pub mod claims;
pub mod clock;
pub mod error;
pub mod extractor;
pub mod password;
pub mod policy;
pub mod service;
pub mod token;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use clock::Clock;
pub use error::AuthError;
pub use extractor::{require_role, AdminOnly, Auth};
pub use service::{login, register, LoginError, RegisterError};
pub use token::{AuthContext, TOKEN_TTL_DAYS};
