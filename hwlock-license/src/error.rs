//! Error types for key handling and license issuance.
//!
//! Verification does not use these: every verification outcome is a
//! [`LicenseStatus`](crate::LicenseStatus) value.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while managing keys or issuing licenses.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// No key could be loaded (missing or unreadable file).
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),

    /// A key file was read but does not contain a valid Ed25519 PEM key.
    #[error("invalid key format: {0}")]
    KeyFormat(String),

    /// Refusing to overwrite an existing key file.
    #[error("key file already exists: {}", .0.display())]
    KeyExists(PathBuf),

    /// Issuance called with empty or unparseable fields.
    #[error("invalid license input: {0}")]
    InvalidInput(String),

    /// Writing a key file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
