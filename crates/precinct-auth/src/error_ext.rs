//! Error extension utilities
//!
//! Context extension methods for converting foreign errors into domain
//! errors at infrastructure boundaries.
//!
//! # Example
//!
//! ```ignore
//! use precinct_auth::error_ext::ErrorContext;
//!
//! let config: AppConfig = figment
//!     .extract()
//!     .config_context("Failed to extract configuration")?;
//! ```

use precinct_domain::error::{Error, Result};
use std::fmt;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context, converting the error to `Error::Internal`
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context for configuration operations
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context for credential store operations
    fn store_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::internal(format!("{}: {}", context, e)))
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::configuration_with_source(context.to_string(), e))
    }

    fn store_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::store_with_source(context.to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_fail() -> std::result::Result<(), std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
    }

    #[test]
    fn test_config_context_wraps_source() {
        let err = io_fail().config_context("Failed to read config file").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_store_context_wraps_source() {
        let err = io_fail().store_context("Failed to read snapshot").unwrap_err();
        assert!(matches!(err, Error::Store { .. }));
    }
}
