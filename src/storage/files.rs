// SPDX-License-Identifier: AGPL-3.0-or-later

//! File-backed JSON storage.
//!
//! Every entity is one JSON file under the data directory. Writes go
//! through a temp file and an atomic rename, so readers never observe a
//! partially written record and a crash mid-write leaves the previous
//! version intact.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use super::StoragePaths;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Entity already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Name cannot be used as a storage key
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// File-backed storage manager.
#[derive(Debug, Clone)]
pub struct FileStorage {
    paths: StoragePaths,
    initialized: bool,
}

impl FileStorage {
    /// Create a new FileStorage instance.
    ///
    /// Does NOT initialize the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Initialize the storage directory structure.
    ///
    /// Creates all required directories. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        let dirs = [
            self.paths.users_dir(),
            self.paths.username_index_dir(),
            self.paths.roles_dir(),
            self.paths.categories_dir(),
            self.paths.movies_dir(),
        ];

        for dir in dirs {
            fs::create_dir_all(&dir)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Check that the data directory is mounted and writable.
    ///
    /// Performs a write-read-delete round trip, used by the readiness probe.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let test_file = self.paths.root().join(".health_check");
        let test_data = b"health_check_data";

        fs::write(&test_file, test_data)?;
        let read_data = fs::read(&test_file)?;
        fs::remove_file(&test_file)?;

        if read_data != test_data {
            return Err(StorageError::Io(io::Error::other(
                "health check data mismatch",
            )));
        }

        Ok(())
    }

    // ========== Generic JSON Operations ==========

    /// Read a JSON file and deserialize it.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Write a JSON file (atomic write via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Create a JSON file that must not already exist.
    ///
    /// Uses `create_new` so two concurrent writers for the same path cannot
    /// both succeed. This backs the username uniqueness index.
    pub fn create_new_json<T: Serialize>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    StorageError::AlreadyExists(path.display().to_string())
                } else {
                    StorageError::from(e)
                }
            })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(StorageError::from)?;
        Ok(())
    }

    /// Check if a file exists.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    /// Delete a file.
    pub fn delete(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        fs::remove_file(path.as_ref())?;
        Ok(())
    }

    /// List the stems of all files in a directory with the given extension.
    pub fn list_files(&self, dir: impl AsRef<Path>, extension: &str) -> StorageResult<Vec<String>> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == extension {
                        if let Some(stem) = path.file_stem() {
                            if let Some(id) = stem.to_str() {
                                ids.push(id.to_string());
                            }
                        }
                    }
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::env;

    fn test_storage() -> FileStorage {
        let test_dir = env::temp_dir().join(format!("test-storage-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = FileStorage::new(paths);
        storage.initialize().expect("Failed to initialize test storage");
        storage
    }

    fn cleanup_storage(storage: &FileStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        id: String,
        value: i32,
    }

    #[test]
    fn initialize_creates_directories() {
        let storage = test_storage();

        assert!(storage.paths().users_dir().exists());
        assert!(storage.paths().username_index_dir().exists());
        assert!(storage.paths().roles_dir().exists());
        assert!(storage.paths().categories_dir().exists());
        assert!(storage.paths().movies_dir().exists());

        cleanup_storage(&storage);
    }

    #[test]
    fn write_and_read_json() {
        let storage = test_storage();
        let data = TestData {
            id: "test-1".to_string(),
            value: 42,
        };

        let path = storage.paths().categories_dir().join("test.json");
        storage.write_json(&path, &data).unwrap();

        let read: TestData = storage.read_json(&path).unwrap();
        assert_eq!(read, data);

        cleanup_storage(&storage);
    }

    #[test]
    fn create_new_json_rejects_duplicates() {
        let storage = test_storage();
        let data = TestData {
            id: "x".to_string(),
            value: 1,
        };

        let path = storage.paths().username_index("a@b.com");
        storage.create_new_json(&path, &data).unwrap();

        let result = storage.create_new_json(&path, &data);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        cleanup_storage(&storage);
    }

    #[test]
    fn health_check_works() {
        let storage = test_storage();
        storage.health_check().expect("Health check should pass");
        cleanup_storage(&storage);
    }

    #[test]
    fn list_files_returns_ids() {
        let storage = test_storage();

        for i in 1..=3 {
            let path = storage.paths().movies_dir().join(format!("m-{i}.json"));
            storage
                .write_json(&path, &TestData {
                    id: format!("m-{i}"),
                    value: i,
                })
                .unwrap();
        }

        let ids = storage.list_files(storage.paths().movies_dir(), "json").unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"m-1".to_string()));
        assert!(ids.contains(&"m-3".to_string()));

        cleanup_storage(&storage);
    }

    #[test]
    fn delete_file_removes_it() {
        let storage = test_storage();

        let path = storage.paths().categories_dir().join("to-delete.json");
        storage
            .write_json(&path, &TestData {
                id: "del".to_string(),
                value: 0,
            })
            .unwrap();

        assert!(storage.exists(&path));
        storage.delete(&path).unwrap();
        assert!(!storage.exists(&path));

        cleanup_storage(&storage);
    }

    #[test]
    fn uninitialized_storage_returns_error() {
        let paths = StoragePaths::new("/tmp/never-init");
        let storage = FileStorage::new(paths);

        let result = storage.read_json::<TestData>("/tmp/any.json");
        assert!(matches!(result, Err(StorageError::NotInitialized)));
    }
}
