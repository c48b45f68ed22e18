//! In-process credential store adapter
//!
//! Implements the `CredentialStore` port over in-memory collections with
//! optional JSON snapshots on disk (0600 permissions). Used for
//! development seeding and as the injected fake in tests; production
//! deployments wire the document database behind the same port.

use crate::error_ext::ErrorContext;
use async_trait::async_trait;
use precinct_domain::error::{Error, Result};
use precinct_domain::identity::{Identity, Permission, Role};
use precinct_domain::ports::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

/// On-disk snapshot shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    /// Known identities with their credentials
    identities: Vec<Identity>,
    /// Fine-grained roles
    roles: Vec<Role>,
    /// Every permission in the system
    permissions: Vec<Permission>,
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Snapshot>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot
    ///
    /// Returns `None` if the file doesn't exist, an error if it is
    /// unreadable or invalid.
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .store_context("Failed to read credential snapshot")?;

        let snapshot: Snapshot =
            serde_json::from_str(&content).store_context("Failed to parse credential snapshot")?;

        Ok(Some(Self {
            inner: RwLock::new(snapshot),
        }))
    }

    /// Save the store to a JSON snapshot with 0600 permissions
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .store_context("Failed to create data directory")?;
        }

        let snapshot = self.inner.read().await;
        let content = serde_json::to_string_pretty(&*snapshot)
            .store_context("Failed to serialize credential snapshot")?;
        drop(snapshot);

        tokio::fs::write(path, &content)
            .await
            .store_context("Failed to write credential snapshot")?;

        // Snapshots carry password hashes; keep them owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(path, perms)
                .await
                .store_context("Failed to set snapshot permissions")?;
        }

        Ok(())
    }

    /// Insert or replace an identity (matched by ID)
    pub async fn insert_identity(&self, identity: Identity) {
        let mut inner = self.inner.write().await;
        inner.identities.retain(|i| i.id != identity.id);
        inner.identities.push(identity);
    }

    /// Insert or replace a role (matched by ID)
    pub async fn insert_role(&self, role: Role) {
        let mut inner = self.inner.write().await;
        inner.roles.retain(|r| r.id != role.id);
        inner.roles.push(role);
    }

    /// Insert or replace a permission (matched by ID)
    pub async fn insert_permission(&self, permission: Permission) {
        let mut inner = self.inner.write().await;
        inner.permissions.retain(|p| p.id != permission.id);
        inner.permissions.push(permission);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_identity_by_username(&self, username: &str) -> Result<Option<Identity>> {
        let inner = self.inner.read().await;
        Ok(inner
            .identities
            .iter()
            .find(|i| i.username == username)
            .cloned())
    }

    async fn find_identity_by_id(&self, id: &str) -> Result<Option<Identity>> {
        let inner = self.inner.read().await;
        Ok(inner.identities.iter().find(|i| i.id == id).cloned())
    }

    async fn persist_password_hash(&self, id: &str, hash: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.identities.iter_mut().find(|i| i.id == id) {
            Some(identity) => {
                identity.password_hash = hash.to_string();
                Ok(())
            }
            None => Err(Error::not_found(format!("identity {}", id))),
        }
    }

    async fn find_role_by_id(&self, id: &str) -> Result<Option<Role>> {
        let inner = self.inner.read().await;
        Ok(inner.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all_permissions(&self) -> Result<Vec<Permission>> {
        let inner = self.inner.read().await;
        Ok(inner.permissions.clone())
    }

    async fn find_permissions_by_ids(&self, ids: &[String]) -> Result<Vec<Permission>> {
        let inner = self.inner.read().await;
        Ok(inner
            .permissions
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
