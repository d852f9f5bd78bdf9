// SPDX-License-Identifier: AGPL-3.0-or-later

//! Category repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{FileStorage, StorageError, StorageResult};

/// Category record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCategory {
    /// Unique category identifier (UUID)
    pub id: String,
    /// Category name, unique case-insensitively
    pub name: String,
    /// When the category was created
    pub created_at: DateTime<Utc>,
}

/// Repository for category operations.
pub struct CategoryRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a category exists.
    pub fn exists(&self, category_id: &str) -> bool {
        self.storage.exists(self.storage.paths().category(category_id))
    }

    /// Check if any category already uses the given name (case-insensitive).
    pub fn name_taken(&self, name: &str) -> StorageResult<bool> {
        let lowered = name.trim().to_lowercase();
        Ok(self
            .list_all()?
            .iter()
            .any(|c| c.name.to_lowercase() == lowered))
    }

    /// Get a category by id.
    pub fn get(&self, category_id: &str) -> StorageResult<StoredCategory> {
        let path = self.storage.paths().category(category_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new category.
    pub fn create(&self, category: &StoredCategory) -> StorageResult<()> {
        if self.exists(&category.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Category {}",
                category.id
            )));
        }
        self.storage
            .write_json(self.storage.paths().category(&category.id), category)
    }

    /// Update an existing category.
    pub fn update(&self, category: &StoredCategory) -> StorageResult<()> {
        if !self.exists(&category.id) {
            return Err(StorageError::NotFound(format!("Category {}", category.id)));
        }
        self.storage
            .write_json(self.storage.paths().category(&category.id), category)
    }

    /// Delete a category.
    pub fn delete(&self, category_id: &str) -> StorageResult<()> {
        if !self.exists(category_id) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }
        self.storage.delete(self.storage.paths().category(category_id))
    }

    /// List all categories, ordered by creation time.
    pub fn list_all(&self) -> StorageResult<Vec<StoredCategory>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().categories_dir(), "json")?;

        let mut categories = Vec::new();
        for id in ids {
            match self.get(&id) {
                Ok(category) => categories.push(category),
                Err(e) => {
                    tracing::warn!(category_id = %id, error = %e, "skipping unreadable category record")
                }
            }
        }

        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, StoragePaths};
    use std::env;
    use std::fs;

    fn test_storage() -> FileStorage {
        let test_dir = env::temp_dir().join(format!("test-cat-repo-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = FileStorage::new(paths);
        storage.initialize().expect("Failed to initialize");
        storage
    }

    fn cleanup(storage: &FileStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    fn test_category(id: &str, name: &str) -> StoredCategory {
        StoredCategory {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_get_update_delete() {
        let storage = test_storage();
        let repo = CategoryRepository::new(&storage);

        let mut category = test_category("c-1", "Drama");
        repo.create(&category).unwrap();
        assert_eq!(repo.get("c-1").unwrap().name, "Drama");

        category.name = "Sci-Fi".to_string();
        repo.update(&category).unwrap();
        assert_eq!(repo.get("c-1").unwrap().name, "Sci-Fi");

        repo.delete("c-1").unwrap();
        assert!(matches!(repo.get("c-1"), Err(StorageError::NotFound(_))));

        cleanup(&storage);
    }

    #[test]
    fn name_taken_is_case_insensitive() {
        let storage = test_storage();
        let repo = CategoryRepository::new(&storage);

        repo.create(&test_category("c-1", "Drama")).unwrap();

        assert!(repo.name_taken("drama").unwrap());
        assert!(repo.name_taken(" DRAMA ").unwrap());
        assert!(!repo.name_taken("Comedy").unwrap());

        cleanup(&storage);
    }

    #[test]
    fn update_missing_category_errors() {
        let storage = test_storage();
        let repo = CategoryRepository::new(&storage);

        let result = repo.update(&test_category("ghost", "Nothing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));

        cleanup(&storage);
    }
}
