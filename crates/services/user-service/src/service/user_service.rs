//! User service - Handles account lifecycle use cases.
//!
//! SOLID (SRP): registration, profile edits, role changes and deletion.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt, UserValidError};
use domain::{
    is_valid_role, ChangePasswordRequest, FieldViolation, Membership, PasswordEncoder, ProfileUpdate,
    ProfileView, SignUpRequest, User,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account with the default role and membership
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<User>;

    /// Resolve an account by exact username (`USERNAME_NOT_FOUND` if absent)
    async fn load_user_by_username(&self, username: &str) -> AppResult<User>;

    /// Profile of the named account
    async fn get_profile(&self, username: &str) -> AppResult<ProfileView>;

    /// Every account, in store order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply a validated profile edit
    async fn update_profile(&self, username: &str, update: ProfileUpdate) -> AppResult<User>;

    /// Replace the stored password after checking the current one
    async fn change_password(&self, username: &str, request: ChangePasswordRequest) -> AppResult<()>;

    /// Move an account to another membership tier (admin use)
    async fn update_membership(&self, id: i64, membership: Membership) -> AppResult<User>;

    /// Replace the role set of an account (admin use)
    async fn update_roles(&self, id: i64, roles: BTreeSet<String>) -> AppResult<User>;

    /// Delete the named account
    async fn delete_account(&self, username: &str) -> AppResult<()>;

    /// Delete an account by id (admin use)
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl UserManager {
    /// Create new user service instance with repository and password encoder
    pub fn new(repo: Arc<dyn UserRepository>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { repo, encoder }
    }
}

/// Role sets must be non-empty and follow the `ROLE_` convention.
fn check_roles(roles: &BTreeSet<String>) -> AppResult<()> {
    if roles.is_empty() {
        return Err(AppError::Validation(vec![FieldViolation::new(
            "roles",
            "roles must not be empty",
        )]));
    }

    let violations: Vec<FieldViolation> = roles
        .iter()
        .filter(|role| !is_valid_role(role))
        .map(|role| FieldViolation::new("roles", format!("roles entry '{}' is not a valid role name", role)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<User> {
        // Validate before touching the store
        let violations = request.violations();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        if self.repo.find_by_username(&request.username).await?.is_some() {
            tracing::info!(username = %request.username, "Signup rejected: username taken");
            return Err(UserValidError::DuplicateUsername.into());
        }

        let user = User::create_from_signup(&request, self.encoder.as_ref())?;
        let saved = self.repo.save(user).await?;

        tracing::info!(user_id = ?saved.id, username = %saved.username, "User registered");
        Ok(saved)
    }

    async fn load_user_by_username(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Account(UserValidError::UsernameNotFound))
    }

    async fn get_profile(&self, username: &str) -> AppResult<ProfileView> {
        Ok(self.load_user_by_username(username).await?.to_profile_view())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn update_profile(&self, username: &str, update: ProfileUpdate) -> AppResult<User> {
        let mut user = self.load_user_by_username(username).await?;
        user.apply_profile_update(update)?;
        self.repo.save(user).await
    }

    async fn change_password(&self, username: &str, request: ChangePasswordRequest) -> AppResult<()> {
        domain::validation::ensure_valid(&request)?;

        let mut user = self.load_user_by_username(username).await?;
        if !self.encoder.matches(&request.current_password, &user.password) {
            tracing::info!(username, "Password change rejected");
            return Err(UserValidError::InvalidUsernamePassword.into());
        }

        user.set_password(self.encoder.encode(&request.new_password)?);
        self.repo.save(user).await?;

        tracing::info!(username, "Password changed");
        Ok(())
    }

    async fn update_membership(&self, id: i64, membership: Membership) -> AppResult<User> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        user.membership = membership;
        let saved = self.repo.save(user).await?;

        tracing::info!(user_id = id, %membership, "Membership updated");
        Ok(saved)
    }

    async fn update_roles(&self, id: i64, roles: BTreeSet<String>) -> AppResult<User> {
        check_roles(&roles)?;

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        user.set_roles(roles);
        let saved = self.repo.save(user).await?;

        tracing::info!(user_id = id, roles = ?saved.roles, "Roles updated");
        Ok(saved)
    }

    async fn delete_account(&self, username: &str) -> AppResult<()> {
        let user = self.load_user_by_username(username).await?;
        self.repo.delete(&user).await?;

        tracing::info!(username, "Account deleted");
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        let user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.repo.delete(&user).await?;

        tracing::info!(user_id = id, "User deleted by administrator");
        Ok(())
    }
}
