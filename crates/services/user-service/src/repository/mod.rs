//! Repository layer for data access.

mod collection_repository;
pub mod entities;
mod user_repository;

pub use collection_repository::CollectionUserRepository;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
