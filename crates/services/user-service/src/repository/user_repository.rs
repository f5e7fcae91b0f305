//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::entities::{
    user::{self, ActiveModel, Entity as UserEntity},
    user_role::{self, Entity as UserRoleEntity},
};
use common::{AppError, AppResult, UserValidError};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence contract for user records.
///
/// Username lookups are exact and case-sensitive. Deletion is permanent.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert (no id) or update (id present); returns the record with its id.
    ///
    /// Fails with `DUPLICATE_USERNAME` when another record owns the username.
    async fn save(&self, user: User) -> AppResult<User>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Remove the record and its roles. Unsaved or missing records are ignored.
    async fn delete(&self, user: &User) -> AppResult<()>;
}

/// SeaORM-backed repository; roles live in `user_roles` and load eagerly.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn replace_roles(txn: &DatabaseTransaction, user_id: i64, user: &User) -> AppResult<()> {
        UserRoleEntity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(txn)
            .await?;

        if user.roles.is_empty() {
            return Ok(());
        }

        let rows = user.roles.iter().map(|role| user_role::ActiveModel {
            user_id: Set(user_id),
            role: Set(role.clone()),
        });
        UserRoleEntity::insert_many(rows)
            .exec_without_returning(txn)
            .await?;
        Ok(())
    }

    /// Whether a record other than `user` already owns its username.
    async fn username_taken(txn: &DatabaseTransaction, user: &User) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(user::Column::Username.eq(user.username.as_str()));
        if let Some(id) = user.id {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.one(txn).await?.is_some())
    }
}

/// Unique-key violations can only come from `users.username`; they surface
/// here when a concurrent insert wins the race past `username_taken`.
fn map_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserValidError::DuplicateUsername.into(),
        _ => match err {
            DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        },
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: User) -> AppResult<User> {
        let txn = self.db.begin().await?;

        if Self::username_taken(&txn, &user).await? {
            return Err(UserValidError::DuplicateUsername.into());
        }

        let active = ActiveModel {
            id: user.id.map(Set).unwrap_or(NotSet),
            username: Set(user.username.clone()),
            password: Set(user.password.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            age: Set(user.age),
            membership: Set(user.membership.into()),
        };

        let model = match user.id {
            Some(_) => active.update(&txn).await,
            None => active.insert(&txn).await,
        }
        .map_err(map_write_err)?;

        Self::replace_roles(&txn, model.id, &user).await?;
        txn.commit().await?;

        tracing::debug!(user_id = model.id, "User saved");
        let mut saved = model.into_user(Vec::new());
        saved.set_roles(user.roles);
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let mut rows = UserEntity::find_by_id(id)
            .find_with_related(UserRoleEntity)
            .all(&self.db)
            .await?;

        Ok(rows.pop().map(|(model, roles)| model.into_user(roles)))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut rows = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .find_with_related(UserRoleEntity)
            .all(&self.db)
            .await?;

        Ok(rows.pop().map(|(model, roles)| model.into_user(roles)))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .find_with_related(UserRoleEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, roles)| model.into_user(roles))
            .collect())
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let Some(id) = user.id else {
            return Ok(());
        };

        let txn = self.db.begin().await?;
        UserRoleEntity::delete_many()
            .filter(user_role::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        let result = UserEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::debug!(user_id = id, rows = result.rows_affected, "User deleted");
        Ok(())
    }
}
