//! Authentication service - credential checks and token handling.
//!
//! SOLID (ISP): Contains only authentication operations.
//! Password hashing is delegated to the domain `PasswordEncoder`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult, JwtConfig, UserValidError};
use domain::{PasswordEncoder, User, UserDetails, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use crate::repository::UserRepository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the principal
    pub sub: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a bearer token to the stored account
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    encoder: Arc<dyn PasswordEncoder>,
    config: JwtConfig,
}

impl Authenticator {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        encoder: Arc<dyn PasswordEncoder>,
        config: JwtConfig,
    ) -> Self {
        Self {
            repo,
            encoder,
            config,
        }
    }

    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let hours = self.config.expiration_hours();
        let lifetime = TimeDelta::try_hours(hours)
            .ok_or_else(|| AppError::internal(format!("token lifetime of {}h is out of range", hours)))?;
        let expires_in = hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(|| AppError::internal("token lifetime overflows seconds"))?;

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("token expiry is out of range"))?;

        let claims = Claims {
            sub: user.username.clone(),
            roles: user.roles.iter().cloned().collect(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Account(UserValidError::UsernameNotFound))?;

        if !self.encoder.matches(password, user.password()) || !user.account_status().is_usable() {
            tracing::info!(username, "Login failed");
            return Err(UserValidError::InvalidUsernamePassword.into());
        }

        tracing::info!(username, "Login succeeded");
        self.generate_token(&user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token)?;

        // The account may have been deleted after the token was issued
        self.repo
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
