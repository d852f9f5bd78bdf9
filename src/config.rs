// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for catalog storage | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Symmetric secret for signing session tokens | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the data directory path.
///
/// All users, roles, categories, and movies are stored here as JSON files.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Environment variable name for the token signing secret.
///
/// The same secret signs tokens at login and verifies them on every
/// protected request. The server refuses to start without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Load the token signing secret from the environment.
///
/// Returns an error when the variable is absent or empty so the process
/// can fail fast at startup instead of issuing unverifiable tokens.
pub fn load_jwt_secret() -> Result<String, String> {
    match std::env::var(JWT_SECRET_ENV) {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        Ok(_) => Err(format!("{JWT_SECRET_ENV} is set but empty")),
        Err(_) => Err(format!("{JWT_SECRET_ENV} is not set")),
    }
}
