//! Capabilities an authorization layer reads from an account.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission unit checked by the authorization layer.
///
/// For base roles this is the role string itself, e.g. `ROLE_USER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GrantedAuthority {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Account status flags consulted before granting access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    pub non_expired: bool,
    pub non_locked: bool,
    pub credentials_non_expired: bool,
    pub enabled: bool,
}

impl AccountStatus {
    /// Status of an account with no expiry or lock state.
    pub const fn active() -> Self {
        Self {
            non_expired: true,
            non_locked: true,
            credentials_non_expired: true,
            enabled: true,
        }
    }

    /// True when every flag permits access.
    pub fn is_usable(&self) -> bool {
        self.non_expired && self.non_locked && self.credentials_non_expired && self.enabled
    }
}

/// Principal as seen by the authorization middleware.
pub trait UserDetails {
    fn username(&self) -> &str;

    /// Stored password hash.
    fn password(&self) -> &str;

    fn authorities(&self) -> HashSet<GrantedAuthority>;

    fn account_status(&self) -> AccountStatus {
        AccountStatus::active()
    }

    fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a.as_str() == authority)
    }
}
