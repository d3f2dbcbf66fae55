//! Error types for Realms
//!
//! The ranking and reordering core never fails; these errors come from the
//! I/O seams around it (config files, snapshot files, the session provider).

use thiserror::Error;

/// Errors that can occur in Realms
#[derive(Debug, Error)]
pub enum RealmsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot lookup or invariant errors
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON snapshot errors
    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Realms operations
pub type RealmsResult<T> = Result<T, RealmsError>;
