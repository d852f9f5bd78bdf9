// SPDX-License-Identifier: AGPL-3.0-or-later

//! User repository.
//!
//! ## Storage Layout
//!
//! ```text
//! data/users/{user_id}.json      # Full user record, roles inline
//! data/users/by-name/{name}.json # Uniqueness index, name is normalized
//! ```
//!
//! The index entry is created with create-new semantics before the user
//! record is written, so a concurrent duplicate registration fails at the
//! store layer regardless of any service-level pre-check. The user record
//! itself is a single atomic write that already contains the role
//! assignments; there is no observable state where a created user lacks
//! its role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageError, StorageResult};

/// User record stored on disk. Holds the password hash; never serialized
/// into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// Login handle, an email-shaped string. Stored as given (trimmed);
    /// compared case-insensitively.
    pub username: String,
    /// Display name
    pub display_name: String,
    /// Argon2id password hash (PHC string format)
    pub password_hash: String,
    /// Assigned role names, in assignment order
    pub roles: Vec<String>,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}

/// Username index entry mapping a normalized username to its user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UsernameIndexEntry {
    user_id: String,
}

/// Normalize a username for uniqueness comparison: trim and lowercase.
///
/// Returns `None` when the result is empty or contains any character
/// outside the email charset. The normalized string names a file under
/// the index directory, so nothing that could form a path separator or
/// a relative component may pass.
pub fn normalize_username(username: &str) -> Option<String> {
    let normalized = username.trim().to_lowercase();
    let safe = !normalized.is_empty()
        && normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '%' | '+' | '-'));
    safe.then_some(normalized)
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Get a user by id.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Look up a user by username (case-insensitive, trimmed).
    ///
    /// A username that cannot normalize to a valid index key cannot have
    /// been registered, so it is simply not found.
    pub fn find_by_username(&self, username: &str) -> StorageResult<Option<StoredUser>> {
        let Some(key) = normalize_username(username) else {
            return Ok(None);
        };
        let index_path = self.storage.paths().username_index(&key);

        if !self.storage.exists(&index_path) {
            return Ok(None);
        }

        let entry: UsernameIndexEntry = self.storage.read_json(index_path)?;
        match self.get(&entry.user_id) {
            Ok(user) => Ok(Some(user)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create a new user.
    ///
    /// Claims the username index entry first; a duplicate username fails
    /// here with `AlreadyExists` even under concurrent registration. If
    /// the record write fails afterwards the index entry is removed so the
    /// username is not leaked.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        let key = normalize_username(&user.username)
            .ok_or_else(|| StorageError::InvalidName(user.username.clone()))?;
        let index_path = self.storage.paths().username_index(&key);

        self.storage
            .create_new_json(
                &index_path,
                &UsernameIndexEntry {
                    user_id: user.id.clone(),
                },
            )
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => {
                    StorageError::AlreadyExists(format!("User {}", user.username))
                }
                other => other,
            })?;

        if let Err(e) = self
            .storage
            .write_json(self.storage.paths().user(&user.id), user)
        {
            let _ = self.storage.delete(&index_path);
            return Err(e);
        }

        Ok(())
    }

    /// List all users, ordered by username.
    pub fn list_all(&self) -> StorageResult<Vec<StoredUser>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        let mut users = Vec::new();
        for id in ids {
            match self.get(&id) {
                Ok(user) => users.push(user),
                Err(e) => tracing::warn!(user_id = %id, error = %e, "skipping unreadable user record"),
            }
        }

        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}
