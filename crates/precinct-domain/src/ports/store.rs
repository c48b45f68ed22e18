//! Credential Store Port
//!
//! Defines the contract for the external credential store. The auth core
//! never talks to the document database directly; it is handed an
//! implementation of this trait, which keeps the core testable with an
//! in-process fake.

use crate::error::Result;
use crate::identity::{Identity, Permission, Role};
use async_trait::async_trait;

/// Credential store interface
///
/// A failed call maps to `Error::Store` so callers can distinguish a
/// backend outage from bad credentials. Lookups that merely miss return
/// `Ok(None)`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an identity by login name
    async fn find_identity_by_username(&self, username: &str) -> Result<Option<Identity>>;

    /// Find an identity by ID
    async fn find_identity_by_id(&self, id: &str) -> Result<Option<Identity>>;

    /// Replace the stored password hash for an identity
    async fn persist_password_hash(&self, id: &str, hash: &str) -> Result<()>;

    /// Find a fine-grained role by ID
    async fn find_role_by_id(&self, id: &str) -> Result<Option<Role>>;

    /// List every permission that exists in the system
    async fn find_all_permissions(&self) -> Result<Vec<Permission>>;

    /// Fetch the permissions with the given IDs; unknown IDs are skipped
    async fn find_permissions_by_ids(&self, ids: &[String]) -> Result<Vec<Permission>>;
}
