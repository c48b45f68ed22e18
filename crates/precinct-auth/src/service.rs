//! Login and password-change orchestration
//!
//! Ties the credential store, hasher, similarity guard, and token service
//! together behind a typed API so the route layer stays a thin translation
//! shim.

use crate::password::{self, PasswordPolicy};
use crate::similarity::is_too_similar;
use crate::token::TokenService;
use precinct_domain::error::{Error, Result};
use precinct_domain::identity::CoarseRole;
use precinct_domain::ports::CredentialStore;
use std::sync::Arc;

/// Outcome of a successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Signed bearer token for subsequent requests
    pub token: String,
    /// Unix timestamp after which the token is dead
    pub expires_at: u64,
    /// Identity the token was issued for
    pub subject_id: String,
    /// Coarse role at login time
    pub role: CoarseRole,
}

/// Authentication service
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    policy: PasswordPolicy,
}

impl AuthService {
    /// Create a service with the default password policy
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            tokens,
            policy: PasswordPolicy::default(),
        }
    }

    /// Override the password policy
    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Authenticate a user and issue a bearer token
    ///
    /// Unknown user and wrong password produce the same opaque
    /// `Authentication` error; a store failure stays a distinct `Store`
    /// error so callers can tell bad credentials from a backend outage.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSession> {
        let identity = self
            .store
            .find_identity_by_username(username)
            .await?
            .ok_or_else(|| Error::authentication("Invalid credentials"))?;

        if !password::verify_password(password, &identity.password_hash) {
            tracing::debug!(username, "password verification failed");
            return Err(Error::authentication("Invalid credentials"));
        }

        let issued = self.tokens.issue(&identity.id, identity.role.as_str())?;
        tracing::info!(subject_id = %identity.id, role = %identity.role, "login succeeded");

        Ok(LoginSession {
            token: issued.token,
            expires_at: issued.expires_at,
            subject_id: identity.id,
            role: identity.role,
        })
    }

    /// Change a user's password
    ///
    /// Verifies the current password, applies the strength policy and the
    /// similarity guard to the candidate, then re-hashes and persists.
    /// The similarity guard runs here and only here - never during login.
    pub async fn change_password(
        &self,
        subject_id: &str,
        current: &str,
        new: &str,
    ) -> Result<()> {
        let identity = self
            .store
            .find_identity_by_id(subject_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("identity {}", subject_id)))?;

        if !password::verify_password(current, &identity.password_hash) {
            return Err(Error::authentication("Current password is incorrect"));
        }

        if let Err(violations) = self.policy.validate(new) {
            return Err(Error::invalid_argument(format!(
                "Password rejected: {}",
                violations.join(", ")
            )));
        }

        if is_too_similar(new, current) {
            return Err(Error::invalid_argument(
                "New password is too similar to the current password",
            ));
        }

        let hash = password::hash_password(new)?;
        self.store.persist_password_hash(&identity.id, &hash).await?;
        tracing::info!(subject_id = %identity.id, "password changed");

        Ok(())
    }
}
