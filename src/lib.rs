// SPDX-License-Identifier: AGPL-3.0-or-later

//! Movie catalog service with account-based access control.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Registration, login, tokens and route guards
//! - `storage` - File-backed JSON storage for the catalog
//! - `models` - Request/response types
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
