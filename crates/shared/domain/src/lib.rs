//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, its validation rules, password encoding and the
//! capability set the authorization layer reads from an account.

pub mod constants;
pub mod details;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use details::{AccountStatus, GrantedAuthority, UserDetails};
pub use error::{DomainError, DomainResult};
pub use password::{Argon2PasswordEncoder, PasswordEncoder};
pub use user::{ChangePasswordRequest, Membership, ProfileUpdate, ProfileView, SignUpRequest, User};
pub use validation::{FieldViolation, PHONE_REGEX};
