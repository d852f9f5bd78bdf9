// SPDX-License-Identifier: AGPL-3.0-or-later

//! Movie repository.
//!
//! Listing is paginated with a stable order (creation time, then id) so
//! pages do not shuffle between requests. Search matches a lowercase
//! substring against both name and description, mirroring the catalog's
//! search endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{FileStorage, StorageError, StorageResult};

/// Age classification for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Suitable for ages seven and up
    Seven,
    /// Suitable for ages thirteen and up
    Thirteen,
    /// Suitable for ages sixteen and up
    Sixteen,
    /// Adults only
    Eighteen,
}

/// Movie record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredMovie {
    /// Unique movie identifier (UUID)
    pub id: String,
    /// Movie title
    pub name: String,
    /// Plot description
    pub description: String,
    /// Running time in minutes
    pub duration_minutes: u32,
    /// Poster image path, if one has been attached (file handling is
    /// external; only the path is tracked here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Age classification
    pub classification: Classification,
    /// Owning category id
    pub category_id: String,
    /// When the movie was created
    pub created_at: DateTime<Utc>,
}

/// Repository for movie operations.
pub struct MovieRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> MovieRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Check if a movie exists.
    pub fn exists(&self, movie_id: &str) -> bool {
        self.storage.exists(self.storage.paths().movie(movie_id))
    }

    /// Get a movie by id.
    pub fn get(&self, movie_id: &str) -> StorageResult<StoredMovie> {
        let path = self.storage.paths().movie(movie_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Movie {movie_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new movie.
    pub fn create(&self, movie: &StoredMovie) -> StorageResult<()> {
        if self.exists(&movie.id) {
            return Err(StorageError::AlreadyExists(format!("Movie {}", movie.id)));
        }
        self.storage
            .write_json(self.storage.paths().movie(&movie.id), movie)
    }

    /// Update an existing movie.
    pub fn update(&self, movie: &StoredMovie) -> StorageResult<()> {
        if !self.exists(&movie.id) {
            return Err(StorageError::NotFound(format!("Movie {}", movie.id)));
        }
        self.storage
            .write_json(self.storage.paths().movie(&movie.id), movie)
    }

    /// Delete a movie.
    pub fn delete(&self, movie_id: &str) -> StorageResult<()> {
        if !self.exists(movie_id) {
            return Err(StorageError::NotFound(format!("Movie {movie_id}")));
        }
        self.storage.delete(self.storage.paths().movie(movie_id))
    }

    /// Total number of movies.
    pub fn count(&self) -> StorageResult<usize> {
        Ok(self
            .storage
            .list_files(self.storage.paths().movies_dir(), "json")?
            .len())
    }

    /// List one page of movies plus the total count.
    ///
    /// Pages are 1-based; out-of-range pages return an empty slice.
    pub fn list_page(
        &self,
        page_number: usize,
        page_size: usize,
    ) -> StorageResult<(Vec<StoredMovie>, usize)> {
        let all = self.list_all()?;
        let total = all.len();

        // Client-supplied page numbers can be arbitrarily large.
        let start = page_number.saturating_sub(1).saturating_mul(page_size);
        let page = all.into_iter().skip(start).take(page_size).collect();
        Ok((page, total))
    }

    /// List all movies in a category.
    pub fn list_by_category(&self, category_id: &str) -> StorageResult<Vec<StoredMovie>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|m| m.category_id == category_id)
            .collect())
    }

    /// Search movies whose name or description contains the term
    /// (case-insensitive).
    pub fn search(&self, term: &str) -> StorageResult<Vec<StoredMovie>> {
        let term = term.to_lowercase();
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&term)
                    || m.description.to_lowercase().contains(&term)
            })
            .collect())
    }

    fn list_all(&self) -> StorageResult<Vec<StoredMovie>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().movies_dir(), "json")?;

        let mut movies = Vec::new();
        for id in ids {
            match self.get(&id) {
                Ok(movie) => movies.push(movie),
                Err(e) => tracing::warn!(movie_id = %id, error = %e, "skipping unreadable movie record"),
            }
        }

        movies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, StoragePaths};
    use chrono::TimeZone;
    use std::env;
    use std::fs;

    fn test_storage() -> FileStorage {
        let test_dir = env::temp_dir().join(format!("test-movie-repo-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = FileStorage::new(paths);
        storage.initialize().expect("Failed to initialize");
        storage
    }

    fn cleanup(storage: &FileStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    fn test_movie(id: &str, name: &str, minute: u32) -> StoredMovie {
        StoredMovie {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("Description of {name}"),
            duration_minutes: 120,
            poster_path: None,
            classification: Classification::Thirteen,
            category_id: "cat-1".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    #[test]
    fn create_get_update_delete() {
        let storage = test_storage();
        let repo = MovieRepository::new(&storage);

        let mut movie = test_movie("m-1", "Alien", 0);
        repo.create(&movie).unwrap();
        assert_eq!(repo.get("m-1").unwrap().name, "Alien");

        movie.duration_minutes = 137;
        repo.update(&movie).unwrap();
        assert_eq!(repo.get("m-1").unwrap().duration_minutes, 137);

        repo.delete("m-1").unwrap();
        assert!(matches!(repo.get("m-1"), Err(StorageError::NotFound(_))));

        cleanup(&storage);
    }

    #[test]
    fn pagination_is_stable_and_bounded() {
        let storage = test_storage();
        let repo = MovieRepository::new(&storage);

        for i in 0..5 {
            repo.create(&test_movie(&format!("m-{i}"), &format!("Movie {i}"), i))
                .unwrap();
        }

        let (page1, total) = repo.list_page(1, 2).unwrap();
        assert_eq!(total, 5);
        assert_eq!(
            page1.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["m-0", "m-1"]
        );

        let (page3, _) = repo.list_page(3, 2).unwrap();
        assert_eq!(page3.len(), 1);
        assert_eq!(page3[0].id, "m-4");

        let (page9, _) = repo.list_page(9, 2).unwrap();
        assert!(page9.is_empty());

        cleanup(&storage);
    }

    #[test]
    fn huge_page_number_returns_empty_page() {
        let storage = test_storage();
        let repo = MovieRepository::new(&storage);

        repo.create(&test_movie("m-1", "Alien", 0)).unwrap();

        let (page, total) = repo.list_page(usize::MAX, 10).unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 1);

        let (page, _) = repo.list_page(usize::MAX, usize::MAX).unwrap();
        assert!(page.is_empty());

        cleanup(&storage);
    }

    #[test]
    fn search_matches_name_and_description() {
        let storage = test_storage();
        let repo = MovieRepository::new(&storage);

        repo.create(&test_movie("m-1", "The Matrix", 0)).unwrap();
        repo.create(&test_movie("m-2", "Inception", 1)).unwrap();

        let hits = repo.search("MATRIX").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "m-1");

        // Description contains the movie's name too.
        let hits = repo.search("description of inception").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "m-2");

        assert!(repo.search("nothing here").unwrap().is_empty());

        cleanup(&storage);
    }

    #[test]
    fn list_by_category_filters() {
        let storage = test_storage();
        let repo = MovieRepository::new(&storage);

        let mut other = test_movie("m-2", "Other", 1);
        other.category_id = "cat-2".to_string();

        repo.create(&test_movie("m-1", "Mine", 0)).unwrap();
        repo.create(&other).unwrap();

        let in_cat1 = repo.list_by_category("cat-1").unwrap();
        assert_eq!(in_cat1.len(), 1);
        assert_eq!(in_cat1[0].id, "m-1");

        cleanup(&storage);
    }
}
