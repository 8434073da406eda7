//! Defines application-specific error types.
//!
//! Only conditions that stop a run end up here. Listing failures, failed
//! downloads and missing files are recovered where they happen and surface as
//! log lines, a smaller mirror, or absent entries in the digest map.

use thiserror::Error;

/// Application-specific errors used throughout `repohash`.
#[derive(Error, Debug)]
pub enum Error {
    // --- I/O Errors ---
    /// Error occurring during file or directory access (read, write, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Configuration Errors ---
    /// The repository reference could not be turned into a contents API URL.
    #[error("Invalid repository URL '{input}': {reason}")]
    InvalidRepoUrl {
        /// The repository reference as given by the user.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(String),

    // --- Transport / Serialization ---
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The digest map could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // --- Signal Handling ---
    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

/// Result alias used by the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an `Error::Io` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
