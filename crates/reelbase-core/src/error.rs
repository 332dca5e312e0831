//! Error types for Reelbase core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while the command-line front end uses `anyhow` for
//! convenient error handling.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ReelError
pub type Result<T> = std::result::Result<T, ReelError>;

/// Core error types for Reelbase operations.
///
/// Every variant is local to the operation that raised it: the backing file is
/// either fully rewritten or left untouched, never half-written.
#[derive(Error, Debug)]
pub enum ReelError {
    // === Storage Errors ===
    /// The backing file could not be read or written
    #[error("storage unavailable at {path}: {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    /// The backing file was read but its contents are malformed
    #[error("catalog file {path} is corrupted: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// The file extension does not name a supported catalog format
    #[error("unsupported catalog format for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    // === Catalog Errors ===
    /// The referenced title is not in the catalog
    #[error("movie \"{title}\" is not in the catalog")]
    NotFound { title: String },

    /// An identical record already exists
    #[error("movie \"{title}\" already exists in the catalog")]
    DuplicateEntry { title: String },

    // === Lookup Errors ===
    /// The external lookup service failed
    #[error("movie lookup unavailable: {reason}")]
    LookupUnavailable { reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed or a required value is missing
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error outside of the catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReelError {
    /// Returns true if this error should be reported to the user as a
    /// message rather than aborting the command.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ReelError::NotFound { .. }
                | ReelError::DuplicateEntry { .. }
                | ReelError::LookupUnavailable { .. }
        )
    }

    /// Create a storage error for the given path
    pub fn storage(path: &Path, reason: impl ToString) -> Self {
        ReelError::StorageUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a corruption error for the given path
    pub fn corrupt(path: &Path, reason: impl ToString) -> Self {
        ReelError::CorruptStore {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a not-found error
    pub fn not_found(title: impl Into<String>) -> Self {
        ReelError::NotFound {
            title: title.into(),
        }
    }

    /// Create a lookup error
    pub fn lookup(reason: impl ToString) -> Self {
        ReelError::LookupUnavailable {
            reason: reason.to_string(),
        }
    }
}
