//! Error types for the Resonance core

use thiserror::Error;

/// Main error type for Resonance core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// A caller-supplied argument was rejected (empty logger name, empty
    /// settings base directory, malformed settings JSON)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A logger was requested before the registry was initialized
    #[error("Logging system not initialized")]
    NotInitialized,

    /// Operation on a handle whose backing resources have been released
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// General I/O error (directory creation, file open, flush)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while encoding settings for persistence
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using CoreError
pub type CoreResult<T> = Result<T, CoreError>;
