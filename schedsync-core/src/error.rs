//! Error types for schedsync.

use thiserror::Error;

/// Errors that can occur in schedsync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{name}' not found in PATH. Install it with:\n  cargo install {binary}")]
    ProviderNotInstalled { name: String, binary: String },

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Event '{0}' has no destination id")]
    MissingEventId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for schedsync operations.
pub type SyncResult<T> = Result<T, SyncError>;
