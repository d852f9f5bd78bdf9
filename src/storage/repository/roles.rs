// SPDX-License-Identifier: AGPL-3.0-or-later

//! Role registry.
//!
//! Roles are plain named records, created lazily the first time a
//! registration references them. `ensure` is idempotent so concurrent
//! create-if-absent calls for the same role never error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageResult};

/// Role record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredRole {
    /// Role name, unique (one file per name)
    pub name: String,
    /// When the role was first created
    pub created_at: DateTime<Utc>,
}

/// Repository for the role registry.
pub struct RoleRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> RoleRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a role exists.
    pub fn exists(&self, name: &str) -> bool {
        self.storage.exists(self.storage.paths().role(name))
    }

    /// Create the role if it does not exist yet.
    ///
    /// Losing a create race to another request is success: the role exists
    /// either way.
    pub fn ensure(&self, name: &str) -> StorageResult<()> {
        if self.exists(name) {
            return Ok(());
        }

        let role = StoredRole {
            name: name.to_string(),
            created_at: Utc::now(),
        };
        match self.storage.create_new_json(self.storage.paths().role(name), &role) {
            Ok(()) => Ok(()),
            Err(super::super::StorageError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// List all role names.
    pub fn list_all(&self) -> StorageResult<Vec<String>> {
        let mut names = self
            .storage
            .list_files(self.storage.paths().roles_dir(), "json")?;
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, StoragePaths};
    use std::env;
    use std::fs;

    fn test_storage() -> FileStorage {
        let test_dir = env::temp_dir().join(format!("test-role-repo-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = FileStorage::new(paths);
        storage.initialize().expect("Failed to initialize");
        storage
    }

    fn cleanup(storage: &FileStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    #[test]
    fn ensure_creates_role_once() {
        let storage = test_storage();
        let repo = RoleRepository::new(&storage);

        assert!(!repo.exists("Admin"));
        repo.ensure("Admin").unwrap();
        assert!(repo.exists("Admin"));

        // Idempotent: a second ensure is not an error.
        repo.ensure("Admin").unwrap();

        cleanup(&storage);
    }

    #[test]
    fn role_names_are_case_sensitive() {
        let storage = test_storage();
        let repo = RoleRepository::new(&storage);

        repo.ensure("Admin").unwrap();
        assert!(!repo.exists("admin"));

        cleanup(&storage);
    }

    #[test]
    fn list_all_returns_sorted_names() {
        let storage = test_storage();
        let repo = RoleRepository::new(&storage);

        repo.ensure("Editor").unwrap();
        repo.ensure("Admin").unwrap();

        assert_eq!(repo.list_all().unwrap(), vec!["Admin", "Editor"]);

        cleanup(&storage);
    }
}
