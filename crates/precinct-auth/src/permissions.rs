//! Effective permission set resolution
//!
//! An identity's effective set is the union of its fine-grained role's
//! permissions, its direct grants, and - when the legacy coarse role is
//! admin - every permission code in the system. The set is recomputed on
//! every call and never cached, so an administrative edit to a role is
//! picked up by the next check; two concurrent requests may observe
//! different snapshots during such an edit, which is accepted.

use precinct_domain::error::Result;
use precinct_domain::identity::{CoarseRole, Identity};
use precinct_domain::ports::CredentialStore;
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only permission queries over the credential store
#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn CredentialStore>,
}

impl PermissionResolver {
    /// Create a resolver over the given store
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Compute the identity's effective permission codes, lower-cased
    pub async fn effective_permissions(&self, identity: &Identity) -> Result<HashSet<String>> {
        let mut codes = HashSet::new();

        if let Some(role_id) = &identity.custom_role_id {
            match self.store.find_role_by_id(role_id).await? {
                Some(role) => {
                    let permissions = self
                        .store
                        .find_permissions_by_ids(&role.permission_ids)
                        .await?;
                    codes.extend(permissions.into_iter().map(|p| p.code.to_lowercase()));
                }
                None => {
                    // Dangling reference: the role was deleted after
                    // assignment. Contributes nothing.
                    tracing::debug!(role_id = %role_id, "assigned role no longer exists");
                }
            }
        }

        if !identity.direct_permission_ids.is_empty() {
            let permissions = self
                .store
                .find_permissions_by_ids(&identity.direct_permission_ids)
                .await?;
            codes.extend(permissions.into_iter().map(|p| p.code.to_lowercase()));
        }

        // Admin is always a superset, regardless of custom-role or
        // direct-grant configuration.
        if identity.role == CoarseRole::Admin {
            let all = self.store.find_all_permissions().await?;
            codes.extend(all.into_iter().map(|p| p.code.to_lowercase()));
        }

        Ok(codes)
    }

    /// Membership test against the effective set; `code` is matched
    /// case-insensitively
    pub async fn has_permission(&self, identity: &Identity, code: &str) -> Result<bool> {
        let codes = self.effective_permissions(identity).await?;
        Ok(codes.contains(&code.to_lowercase()))
    }

    /// True if the identity holds at least one of `codes`
    pub async fn has_any(&self, identity: &Identity, codes: &[&str]) -> Result<bool> {
        let effective = self.effective_permissions(identity).await?;
        Ok(codes.iter().any(|c| effective.contains(&c.to_lowercase())))
    }

    /// True if the identity holds every one of `codes`
    pub async fn has_all(&self, identity: &Identity, codes: &[&str]) -> Result<bool> {
        let effective = self.effective_permissions(identity).await?;
        Ok(codes.iter().all(|c| effective.contains(&c.to_lowercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;
    use precinct_domain::identity::{Permission, Role};

    async fn seeded_store() -> Arc<MemoryCredentialStore> {
        let store = Arc::new(MemoryCredentialStore::new());
        for (id, code) in [
            ("p-1", "Users.Create"),
            ("p-2", "users.delete"),
            ("p-3", "reports.read"),
            ("p-4", "evidence.sign-out"),
        ] {
            store
                .insert_permission(Permission {
                    id: id.to_string(),
                    code: code.to_string(),
                })
                .await;
        }
        store
            .insert_role(Role {
                id: "r-desk".to_string(),
                code: "desk-sergeant".to_string(),
                permission_ids: vec!["p-3".to_string()],
            })
            .await;
        store
    }

    fn officer(custom_role_id: Option<&str>, direct: &[&str]) -> Identity {
        Identity {
            id: "i-1".to_string(),
            username: "jdoe".to_string(),
            password_hash: String::new(),
            role: CoarseRole::Officer,
            custom_role_id: custom_role_id.map(str::to_string),
            direct_permission_ids: direct.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_officer_without_grants_has_empty_set() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let codes = resolver
            .effective_permissions(&officer(None, &[]))
            .await
            .unwrap();
        assert!(codes.is_empty());
    }

    #[tokio::test]
    async fn test_admin_gets_full_system_set() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let mut identity = officer(None, &[]);
        identity.role = CoarseRole::Admin;

        let codes = resolver.effective_permissions(&identity).await.unwrap();
        assert_eq!(codes.len(), 4);
        assert!(codes.contains("users.create"));
        assert!(codes.contains("evidence.sign-out"));
    }

    #[tokio::test]
    async fn test_custom_role_and_direct_grants_union() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let identity = officer(Some("r-desk"), &["p-1"]);

        let codes = resolver.effective_permissions(&identity).await.unwrap();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains("reports.read"));
        assert!(codes.contains("users.create"));
    }

    #[tokio::test]
    async fn test_dangling_role_reference_contributes_nothing() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let identity = officer(Some("r-gone"), &["p-2"]);

        let codes = resolver.effective_permissions(&identity).await.unwrap();
        assert_eq!(codes.len(), 1);
        assert!(codes.contains("users.delete"));
    }

    #[tokio::test]
    async fn test_has_permission_is_case_insensitive() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let identity = officer(None, &["p-1"]);

        // Stored as "Users.Create", queried lower and mixed case.
        assert!(resolver
            .has_permission(&identity, "users.create")
            .await
            .unwrap());
        assert!(resolver
            .has_permission(&identity, "USERS.CREATE")
            .await
            .unwrap());
        assert!(!resolver
            .has_permission(&identity, "users.delete")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_has_any_and_has_all() {
        let resolver = PermissionResolver::new(seeded_store().await);
        let identity = officer(Some("r-desk"), &["p-1"]);

        assert!(resolver
            .has_any(&identity, &["users.delete", "reports.read"])
            .await
            .unwrap());
        assert!(resolver
            .has_all(&identity, &["reports.read", "users.create"])
            .await
            .unwrap());
        assert!(!resolver
            .has_all(&identity, &["reports.read", "users.delete"])
            .await
            .unwrap());
    }
}
