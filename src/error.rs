//! Error types for the tradewinds skill

use thiserror::Error;

/// Result type alias for tradewinds operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the tradewinds skill
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Database pool error
    #[error("database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Malformed filter composition
    #[error("filter error: {0}")]
    Filter(String),

    /// Persist called on a record with nothing to write
    #[error("persist error: {0}")]
    Persist(String),

    /// Tool dispatch error (unknown tool, bad arguments)
    #[error("tool error: {0}")]
    Tool(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),
}
