//! Trust engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while deciding or persisting library execution.
#[derive(Debug, Error)]
pub enum TrustError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The decision store could not be read or written.
    #[error("Store error at {path}: {message}")]
    Store {
        /// Location of the backing file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A confirmation request carried unusable parameters.
    #[error("Invalid execution parameters: {0}")]
    InvalidParams(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrustError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a store error for the given backing file.
    pub fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}
