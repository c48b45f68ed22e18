//! Centralized configuration constants

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "PRECINCT";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "precinct.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "precinct-portal";

/// bcrypt work factor for credential hashing
///
/// Costs roughly 200-300ms per hash on commodity hardware.
pub const BCRYPT_COST: u32 = 12;

/// Bearer token lifetime in seconds (7 days)
///
/// Tokens are not revocable server-side; expiry is the only lifecycle
/// event after issuance.
pub const TOKEN_TTL_SECS: u64 = 604_800;

/// Minimum accepted signing-secret length in bytes
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Issuer claim stamped into tokens
pub const TOKEN_ISSUER: &str = "precinct-portal";

/// Similarity ratio above which a new password is rejected outright
pub const SIMILARITY_REJECT_RATIO: f64 = 0.7;

/// Similarity ratio combined with a small length delta that still rejects
pub const SIMILARITY_NEAR_LENGTH_RATIO: f64 = 0.6;

/// Length delta treated as "near length" by the similarity guard
pub const SIMILARITY_NEAR_LENGTH_DELTA: usize = 2;

/// Upper bound on characters fed to the edit-distance computation
///
/// The distance table is O(n*m) over user-supplied text at request time;
/// longer inputs are compared by their first `SIMILARITY_MAX_CHARS` chars.
pub const SIMILARITY_MAX_CHARS: usize = 256;
