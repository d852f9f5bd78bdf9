// SPDX-License-Identifier: AGPL-3.0-or-later

//! Path constants and utilities for the catalog storage layout.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities for the file-backed catalog store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user record.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    /// Directory for the username uniqueness index.
    ///
    /// Each file is named after the normalized (trimmed, lowercased)
    /// username and contains the owning user's id. Creating the index file
    /// with create-new semantics is the authoritative uniqueness guard.
    pub fn username_index_dir(&self) -> PathBuf {
        self.users_dir().join("by-name")
    }

    /// Path to the uniqueness index entry for a normalized username.
    pub fn username_index(&self, normalized: &str) -> PathBuf {
        self.username_index_dir().join(format!("{normalized}.json"))
    }

    // ========== Role Paths ==========

    /// Directory containing the role registry.
    pub fn roles_dir(&self) -> PathBuf {
        self.root.join("roles")
    }

    /// Path to a specific role record.
    pub fn role(&self, name: &str) -> PathBuf {
        self.roles_dir().join(format!("{name}.json"))
    }

    // ========== Category Paths ==========

    /// Directory containing all categories.
    pub fn categories_dir(&self) -> PathBuf {
        self.root.join("categories")
    }

    /// Path to a specific category record.
    pub fn category(&self, category_id: &str) -> PathBuf {
        self.categories_dir().join(format!("{category_id}.json"))
    }

    // ========== Movie Paths ==========

    /// Directory containing all movies.
    pub fn movies_dir(&self) -> PathBuf {
        self.root.join("movies")
    }

    /// Path to a specific movie record.
    pub fn movie(&self, movie_id: &str) -> PathBuf {
        self.movies_dir().join(format!("{movie_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_dir() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.user("u-123"),
            PathBuf::from("/tmp/test-data/users/u-123.json")
        );
    }

    #[test]
    fn user_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.users_dir(), PathBuf::from("/data/users"));
        assert_eq!(
            paths.username_index("a@b.com"),
            PathBuf::from("/data/users/by-name/a@b.com.json")
        );
    }

    #[test]
    fn role_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.roles_dir(), PathBuf::from("/data/roles"));
        assert_eq!(paths.role("Admin"), PathBuf::from("/data/roles/Admin.json"));
    }

    #[test]
    fn catalog_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(
            paths.category("c-1"),
            PathBuf::from("/data/categories/c-1.json")
        );
        assert_eq!(paths.movie("m-1"), PathBuf::from("/data/movies/m-1.json"));
    }
}
