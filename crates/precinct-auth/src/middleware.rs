//! Request-boundary authentication adapter
//!
//! Wraps request handlers with token verification and optional coarse-role
//! enforcement. This layer does not speak HTTP: it consumes the raw
//! `Authorization` header value and yields a typed pass/fail outcome that
//! the route layer translates to a status code.
//!
//! Every request is evaluated independently: Unauthenticated -> (valid
//! token) -> Authenticated -> (optional role gate) -> Authorized, with no
//! intermediate or retry states.

use crate::token::TokenService;
use precinct_domain::identity::CoarseRole;
use std::sync::Arc;

/// Identity verified from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Subject (identity ID)
    pub subject_id: String,
    /// Verified coarse role
    pub role: CoarseRole,
}

/// Why a wrapped handler was not invoked
///
/// Malformed, expired, forged, and unknown-role tokens all collapse to
/// `Unauthorized`; no further detail crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid token presented
    Unauthorized,
    /// Valid token, wrong coarse role
    Forbidden,
}

/// Authentication middleware over a token service
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    /// Create a middleware over the given token service
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Verify the bearer token from an `Authorization` header value
    ///
    /// A verified token carrying a role outside the known coarse set is
    /// an invalid token, not a permissive default.
    pub fn authenticate(&self, authorization: Option<&str>) -> Option<AuthIdentity> {
        let header = authorization?;
        let identity = self.tokens.verify(header)?;

        match identity.role.parse::<CoarseRole>() {
            Ok(role) => Some(AuthIdentity {
                subject_id: identity.subject_id,
                role,
            }),
            Err(()) => {
                tracing::debug!(role = %identity.role, "token carries unknown role");
                None
            }
        }
    }

    /// Run `handler` with the verified identity, or reject
    pub fn require_auth<F, R>(
        &self,
        authorization: Option<&str>,
        handler: F,
    ) -> Result<R, AuthRejection>
    where
        F: FnOnce(AuthIdentity) -> R,
    {
        match self.authenticate(authorization) {
            Some(identity) => Ok(handler(identity)),
            None => Err(AuthRejection::Unauthorized),
        }
    }

    /// As `require_auth`, plus an exact coarse-role gate
    pub fn require_role<F, R>(
        &self,
        required: CoarseRole,
        authorization: Option<&str>,
        handler: F,
    ) -> Result<R, AuthRejection>
    where
        F: FnOnce(AuthIdentity) -> R,
    {
        let identity = self
            .authenticate(authorization)
            .ok_or(AuthRejection::Unauthorized)?;

        if identity.role != required {
            return Err(AuthRejection::Forbidden);
        }

        Ok(handler(identity))
    }
}
