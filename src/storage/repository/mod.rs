// SPDX-License-Identifier: AGPL-3.0-or-later

//! Entity repositories on top of [`super::FileStorage`].

pub mod categories;
pub mod movies;
pub mod roles;
pub mod users;

pub use categories::{CategoryRepository, StoredCategory};
pub use movies::{Classification, MovieRepository, StoredMovie};
pub use roles::{RoleRepository, StoredRole};
pub use users::{normalize_username, StoredUser, UserRepository};
