// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Catalog Storage Module
//!
//! Persistent storage for users, roles, categories and movies as JSON
//! files under the data directory (`DATA_DIR`, default `./data`).
//!
//! ## Storage Layout
//!
//! ```text
//! data/
//!   users/
//!     {user_id}.json        # User record (roles inline, password hash)
//!     by-name/{name}.json   # Username uniqueness index
//!   roles/
//!     {name}.json           # Role registry, created lazily
//!   categories/
//!     {category_id}.json
//!   movies/
//!     {movie_id}.json
//! ```
//!
//! Writes are atomic (temp file + rename). The username index file is
//! created with create-new semantics and is the authoritative uniqueness
//! constraint for registration.

pub mod files;
pub mod paths;
pub mod repository;

pub use files::{FileStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    CategoryRepository, Classification, MovieRepository, RoleRepository, StoredCategory,
    StoredMovie, StoredRole, StoredUser, UserRepository,
};
