//! Signed bearer token lifecycle
//!
//! Two asymmetric decode paths exist because the portal runs the same
//! structural checks on both client and server, but only the server holds
//! the signing secret: `verify` is the authoritative path for
//! authorization decisions, while `decode_unverified` exists solely for
//! non-authoritative client-side display choices and must never gate a
//! privileged action.
//!
//! Both paths share one `normalize` helper for prefix stripping and the
//! 3-segment shape check, so the shape invariant cannot drift between
//! them.

use crate::constants::{MIN_JWT_SECRET_LENGTH, TOKEN_ISSUER};
use base64::{Engine as _, engine::general_purpose};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use precinct_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Signed token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity ID)
    pub sub: String,
    /// Coarse role literal
    pub role: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

/// Identity carried by a structurally valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    /// Subject (identity ID)
    pub subject_id: String,
    /// Coarse role literal, as found in the payload
    pub role: String,
}

/// Result of a successful issuance
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed token string (header.payload.signature)
    pub token: String,
    /// Unix timestamp after which the token is dead
    pub expires_at: u64,
}

/// Payload fields read without signature verification
#[derive(Debug, Deserialize)]
struct UnverifiedPayload {
    sub: String,
    role: String,
    #[serde(default)]
    exp: Option<u64>,
}

/// Token issuance and validation service
#[derive(Debug)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    /// Create a token service from the configured signing secret
    ///
    /// A missing or short secret is a configuration error surfaced at
    /// startup. There is no fallback secret anywhere in this crate.
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::configuration(
                "Signing secret is not configured; refusing to start without one",
            ));
        }
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(Error::configuration(format!(
                "Signing secret is {} bytes, minimum {} required",
                secret.len(),
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        })
    }

    /// Issue a signed token for a subject
    ///
    /// Postcondition: the returned token string has exactly 3
    /// dot-separated segments; everything downstream treats that shape as
    /// the primary sanity invariant.
    pub fn issue(&self, subject_id: &str, role: &str) -> Result<IssuedToken> {
        if subject_id.trim().is_empty() {
            return Err(Error::invalid_argument("subject id must not be empty"));
        }
        if role.trim().is_empty() {
            return Err(Error::invalid_argument("role must not be empty"));
        }

        let now = now_unix();
        let claims = Claims {
            sub: subject_id.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
            iss: TOKEN_ISSUER.to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::internal(format!("Token signing failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Verify a token's signature and expiry
    ///
    /// The only mode trusted for authorization decisions. Returns `None`
    /// on signature mismatch, expiry, or any structural failure - the
    /// reason is visible at debug level only, so callers cannot leak a
    /// validity-vs-expiry oracle to clients.
    pub fn verify(&self, token: &str) -> Option<TokenIdentity> {
        let (token, _) = normalize(token)?;

        // A token is valid only while now < exp; no leeway window.
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(TokenIdentity {
                subject_id: data.claims.sub,
                role: data.claims.role,
            }),
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                None
            }
        }
    }

    /// Decode a token's payload WITHOUT checking the signature
    ///
    /// Exists only for client-side UI decisions (e.g. which dashboard to
    /// render); the expiry field is still honored when present. Requires
    /// no secret, hence no `self`.
    pub fn decode_unverified(token: &str) -> Option<TokenIdentity> {
        let (_, segments) = normalize(token)?;

        let payload = general_purpose::URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
        let payload: UnverifiedPayload = serde_json::from_slice(&payload).ok()?;

        if let Some(exp) = payload.exp {
            if exp <= now_unix() {
                return None;
            }
        }

        Some(TokenIdentity {
            subject_id: payload.sub,
            role: payload.role,
        })
    }
}

/// Strip an optional "Bearer " prefix and enforce the 3-segment shape
///
/// Shared by the trusted and untrusted decode paths. Returns the bare
/// token plus its segments, or `None` for any other shape (including the
/// literal strings "null" and "undefined" that lost client sessions tend
/// to send).
fn normalize(token: &str) -> Option<(&str, [&str; 3])> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    Some((token, [parts[0], parts[1], parts[2]]))
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TTL_SECS;

    const SECRET: &str = "unit-test-signing-secret-0123456789abcdef";

    fn service() -> TokenService {
        TokenService::new(SECRET, TOKEN_TTL_SECS).unwrap()
    }

    #[test]
    fn test_missing_secret_fails_loud() {
        let err = TokenService::new("", TOKEN_TTL_SECS).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_short_secret_fails_loud() {
        let err = TokenService::new("too-short", TOKEN_TTL_SECS).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let issued = service().issue("identity-1", "officer").unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
        assert!(issued.expires_at > now_unix());
    }

    #[test]
    fn test_issue_rejects_empty_arguments() {
        let svc = service();
        assert!(matches!(
            svc.issue("", "officer").unwrap_err(),
            Error::InvalidArgument { .. }
        ));
        assert!(matches!(
            svc.issue("identity-1", "  ").unwrap_err(),
            Error::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_verify_round_trip() {
        let svc = service();
        let issued = svc.issue("identity-1", "admin").unwrap();

        let identity = svc.verify(&issued.token).unwrap();
        assert_eq!(identity.subject_id, "identity-1");
        assert_eq!(identity.role, "admin");
    }

    #[test]
    fn test_verify_accepts_bearer_prefix() {
        let svc = service();
        let issued = svc.issue("identity-1", "officer").unwrap();

        let header_value = format!("Bearer {}", issued.token);
        assert!(svc.verify(&header_value).is_some());
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issued = service().issue("identity-1", "officer").unwrap();

        let other =
            TokenService::new("a-completely-different-secret-0123456789", TOKEN_TTL_SECS).unwrap();
        assert!(other.verify(&issued.token).is_none());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let svc = service();
        let claims = Claims {
            sub: "identity-1".to_string(),
            role: "officer".to_string(),
            iat: now_unix() - 10_000,
            exp: now_unix() - 5_000,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(svc.verify(&token).is_none());
        assert!(TokenService::decode_unverified(&token).is_none());
    }

    #[test]
    fn test_verify_rejects_wrong_shape() {
        let svc = service();
        assert!(svc.verify("").is_none());
        assert!(svc.verify("null").is_none());
        assert!(svc.verify("undefined").is_none());
        assert!(svc.verify("only.two").is_none());
        assert!(svc.verify("one.two.three.four").is_none());
    }

    #[test]
    fn test_decode_unverified_round_trip() {
        let issued = service().issue("identity-9", "officer").unwrap();

        let identity = TokenService::decode_unverified(&issued.token).unwrap();
        assert_eq!(identity.subject_id, "identity-9");
        assert_eq!(identity.role, "officer");
    }

    #[test]
    fn test_decode_unverified_ignores_signature() {
        // Tamper with the signature segment: the untrusted path still
        // reads the payload, the trusted path refuses it.
        let svc = service();
        let issued = svc.issue("identity-1", "officer").unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        parts[2] = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let tampered = parts.join(".");

        assert!(TokenService::decode_unverified(&tampered).is_some());
        assert!(svc.verify(&tampered).is_none());
    }

    #[test]
    fn test_decode_unverified_rejects_garbage_payload() {
        assert!(TokenService::decode_unverified("aGVhZGVy.bm90LWpzb24.c2ln").is_none());
    }
}
