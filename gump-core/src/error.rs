//! Error types for the Gump simulation library.

use std::path::PathBuf;

/// Errors raised by configuration loading and the sprite table.
///
/// Physics, collision and state derivation are total; nothing in the
/// per-tick path returns this type except the sprite lookup.
#[derive(Debug, thiserror::Error)]
pub enum GumpError {
    /// A sprite could not be loaded at startup
    #[error("failed to load asset {path}: {reason}")]
    AssetLoad {
        /// Asset path relative to the asset root
        path: PathBuf,
        /// Loader-provided reason
        reason: String,
    },

    /// A derived state has no entry in the sprite table
    #[error("no sprite for player state key {0:#06x}")]
    UnmappedState(u16),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, GumpError>;
