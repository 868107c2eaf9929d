//! Error types for encrypted columns.
//!
//! Write conversions return the collaborator's own error type untouched.
//! [`ColumnError`] is for call sites that also load column settings and want
//! a single error type to `?` through.

use config::ConfigError;
use thiserror::Error;

/// Errors surfaced while building or writing an encrypted column.
#[derive(Debug, Error)]
pub enum ColumnError<E>
where
    E: std::error::Error + 'static,
{
    /// The encryption collaborator rejected a value; the write must not proceed.
    #[error("encryption failed: {0}")]
    Encryption(#[source] E),

    /// Column settings could not be read from the supplied configuration.
    #[error("invalid column settings: {0}")]
    Settings(#[from] ConfigError),
}

impl<E> ColumnError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the collaborator error, if this is an encryption failure.
    pub fn encryption_error(&self) -> Option<&E> {
        match self {
            ColumnError::Encryption(err) => Some(err),
            ColumnError::Settings(_) => None,
        }
    }
}
