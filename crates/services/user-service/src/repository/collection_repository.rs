//! In-memory user repository.
//!
//! Assigns ids from a process-local sequence and enforces username uniqueness
//! itself, matching the contract of the database store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult, UserValidError};
use domain::User;

use super::UserRepository;

#[derive(Debug)]
struct Collection {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// Collection-backed [`UserRepository`] for local runs and tests.
#[derive(Debug)]
pub struct CollectionUserRepository {
    inner: RwLock<Collection>,
}

impl Default for CollectionUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionUserRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collection {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl UserRepository for CollectionUserRepository {
    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        let taken = inner
            .users
            .values()
            .any(|existing| existing.username == user.username && existing.id != user.id);
        if taken {
            return Err(UserValidError::DuplicateUsername.into());
        }

        // Updates must target a stored record; only inserts draw a new id
        let id = match user.id {
            Some(id) if inner.users.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound),
            None => {
                let id = inner.next_id;
                inner.next_id = id
                    .checked_add(1)
                    .ok_or_else(|| AppError::internal("user id sequence exhausted"))?;
                user.set_id(id);
                id
            }
        };
        inner.users.insert(id, user.clone());

        tracing::debug!(user_id = id, "User saved");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        if let Some(id) = user.id {
            self.inner.write().await.users.remove(&id);
        }
        Ok(())
    }
}
