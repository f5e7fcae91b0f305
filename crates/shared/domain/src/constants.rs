//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Prefix shared by every base role name
pub const ROLE_PREFIX: &str = "ROLE_";

/// Default role granted at registration
pub const ROLE_USER: &str = "ROLE_USER";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Check if a role name follows the `ROLE_` naming convention
pub fn is_valid_role(role: &str) -> bool {
    role.len() > ROLE_PREFIX.len()
        && role.starts_with(ROLE_PREFIX)
        && role
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

// =============================================================================
// Validation
// =============================================================================

/// Youngest age accepted on a profile
pub const MIN_AGE: i32 = 14;

/// Oldest age accepted on a profile
pub const MAX_AGE: i32 = 120;

/// Phone number format, e.g. `010-1234-5678` or `02-123-4567`
pub const PHONE_PATTERN: &str = r"^\d{2,3}-\d{3,4}-\d{4}$";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted JWT lifetime in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
