// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared application state.

use crate::auth::AuthContext;
use crate::storage::FileStorage;

/// State handed to every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// File-backed catalog storage
    pub storage: FileStorage,
    /// Token signing and verification context
    pub auth: AuthContext,
}

impl AppState {
    pub fn new(storage: FileStorage, auth: AuthContext) -> Self {
        Self { storage, auth }
    }
}
