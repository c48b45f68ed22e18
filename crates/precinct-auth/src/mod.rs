//! # Precinct Portal Auth Core
//!
//! Authentication, token lifecycle, and permission resolution for the
//! portal. HTTP routing, the document database, and the rest of the
//! portal's screens live elsewhere; this crate only produces pass/fail
//! outcomes plus verified identities, and consumes the credential store
//! through the `CredentialStore` port.
//!
//! # Module Structure
//!
//! - `password` - bcrypt credential hashing and password policy
//! - `similarity` - new-vs-old password similarity guard
//! - `token` - signed bearer token issuance, verification, client decode
//! - `permissions` - effective permission set resolution
//! - `middleware` - request-boundary authentication adapter
//! - `service` - login and password-change orchestration
//! - `config` - configuration loading and validation
//! - `logging` - structured logging setup
//! - `store` - in-process credential store adapter
//!
//! # Example
//!
//! ```rust,no_run
//! use precinct_auth::token::TokenService;
//!
//! # fn example() -> precinct_domain::Result<()> {
//! let tokens = TokenService::new("0123456789abcdef0123456789abcdef", 604_800)?;
//! let issued = tokens.issue("identity-1", "officer")?;
//! assert!(tokens.verify(&issued.token).is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod middleware;
pub mod password;
pub mod permissions;
pub mod service;
pub mod similarity;
pub mod store;
pub mod token;

// Re-export main types for convenience
pub use config::{AppConfig, AuthConfig, ConfigLoader, LoggingConfig};
pub use middleware::{AuthIdentity, AuthMiddleware, AuthRejection};
pub use password::{hash_password, verify_password, PasswordPolicy};
pub use permissions::PermissionResolver;
pub use service::{AuthService, LoginSession};
pub use similarity::is_too_similar;
pub use store::MemoryCredentialStore;
pub use token::{IssuedToken, TokenIdentity, TokenService};
