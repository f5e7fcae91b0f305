//! User domain entity and related types.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_AGE, MIN_AGE, ROLE_USER};
use crate::details::{GrantedAuthority, UserDetails};
use crate::error::{DomainError, DomainResult};
use crate::password::PasswordEncoder;
use crate::validation::{ensure_valid, validate_not_blank, violations_of, FieldViolation, PHONE_REGEX};

/// Membership tier, persisted by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Membership {
    #[default]
    Basic,
    Silver,
    Gold,
}

impl Membership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Basic => "BASIC",
            Membership::Silver => "SILVER",
            Membership::Gold => "GOLD",
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Membership {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(Membership::Basic),
            "SILVER" => Ok(Membership::Silver),
            "GOLD" => Ok(Membership::Gold),
            other => Err(DomainError::invalid_field(
                "membership",
                format!("membership '{}' is not a known tier", other),
            )),
        }
    }
}

/// User domain entity
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub membership: Membership,
    pub roles: BTreeSet<String>,
}

// Keep the hash out of logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("age", &self.age)
            .field("membership", &self.membership)
            .field("roles", &self.roles)
            .finish()
    }
}

impl User {
    /// Build a new account from a signup request.
    ///
    /// The request is validated first; on success the raw password is
    /// replaced by its hash, roles default to `{ROLE_USER}` and membership
    /// to `BASIC`.
    ///
    /// # Errors
    /// Returns every field violation when the request is invalid, or a
    /// password error when hashing fails.
    pub fn create_from_signup(
        request: &SignUpRequest,
        encoder: &dyn PasswordEncoder,
    ) -> DomainResult<Self> {
        ensure_valid(request)?;

        Ok(Self {
            id: None,
            username: request.username.clone(),
            password: encoder.encode(&request.password)?,
            email: request.email.clone(),
            phone: request.phone.clone(),
            age: request.age,
            membership: Membership::default(),
            roles: BTreeSet::from([ROLE_USER.to_string()]),
        })
    }

    /// Project the fields safe to show to the account owner.
    pub fn to_profile_view(&self) -> ProfileView {
        ProfileView {
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            age: self.age,
            membership: self.membership,
        }
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn set_roles(&mut self, roles: BTreeSet<String>) {
        self.roles = roles;
    }

    /// Replace the stored hash; callers encode the new password first.
    pub fn set_password(&mut self, password_hash: String) {
        self.password = password_hash;
    }

    /// Apply the provided profile fields, leaving absent ones untouched.
    ///
    /// # Errors
    /// Returns every field violation; nothing is changed in that case.
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) -> DomainResult<()> {
        ensure_valid(&update)?;

        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        Ok(())
    }
}

impl UserDetails for User {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn authorities(&self) -> HashSet<GrantedAuthority> {
        self.roles
            .iter()
            .map(|role| GrantedAuthority::new(role.as_str()))
            .collect()
    }
}

/// Registration request
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SignUpRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub username: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[cfg_attr(feature = "openapi", schema(example = "SecurePass123!"))]
    pub password: String,
    #[validate(email(message = "must be a valid email address"))]
    #[cfg_attr(feature = "openapi", schema(example = "alice@example.com"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "must match NN[N]-NNN[N]-NNNN"))]
    #[cfg_attr(feature = "openapi", schema(example = "010-1234-5678"))]
    pub phone: Option<String>,
    #[validate(range(min = MIN_AGE, max = MAX_AGE))]
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: Option<i32>,
}

impl SignUpRequest {
    /// Every rule the request breaks, sorted by field.
    pub fn violations(&self) -> Vec<FieldViolation> {
        violations_of(self)
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("age", &self.age)
            .finish()
    }
}

/// Profile edit; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileUpdate {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "must match NN[N]-NNN[N]-NNNN"))]
    pub phone: Option<String>,
    #[validate(range(min = MIN_AGE, max = MAX_AGE))]
    pub age: Option<i32>,
}

/// Password change by the account owner
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub current_password: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Owner-facing profile (never carries id, password or roles)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileView {
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub membership: Membership,
}
