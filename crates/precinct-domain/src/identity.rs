//! Identity, role, and permission records
//!
//! These mirror the documents held by the external credential store. The
//! auth core only reads them; creation and deletion belong to the portal's
//! administration screens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legacy coarse role carried directly on the identity and inside tokens.
///
/// Exactly two values exist; anything else found in a token is treated as
/// an invalid token, never as a permissive default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseRole {
    /// Regular portal user
    Officer,
    /// Full access - implies every permission code in the system
    Admin,
}

impl CoarseRole {
    /// The wire/storage literal for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            CoarseRole::Officer => "officer",
            CoarseRole::Admin => "admin",
        }
    }
}

impl fmt::Display for CoarseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoarseRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "officer" => Ok(CoarseRole::Officer),
            "admin" => Ok(CoarseRole::Admin),
            _ => Err(()),
        }
    }
}

/// A portal user as stored by the credential store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity ID
    pub id: String,
    /// Login name
    pub username: String,
    /// Salted adaptive password hash
    #[serde(default)]
    pub password_hash: String,
    /// Legacy coarse role
    pub role: CoarseRole,
    /// Optional reference to a fine-grained role
    #[serde(default)]
    pub custom_role_id: Option<String>,
    /// Permissions granted directly to this identity
    #[serde(default)]
    pub direct_permission_ids: Vec<String>,
}

/// Fine-grained role: a named bundle of permission codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID
    pub id: String,
    /// Role code (e.g. "desk-sergeant")
    pub code: String,
    /// Permissions attached to the role
    pub permission_ids: Vec<String>,
}

/// A flat capability tag (e.g. "users.create")
///
/// No hierarchy; membership is the only relation that matters. Codes are
/// compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission ID
    pub id: String,
    /// Permission code
    pub code: String,
}
