//! Error types for statement execution and connection management.

use quarry_core::CompileError;

/// Errors that can occur while compiling, submitting or connecting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A statement was submitted before a connection was established.
    #[error("Database connection not established. Call connect() first")]
    ConnectionUnavailable,

    /// The configured driver is outside the supported set.
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    /// The named connection is not configured.
    #[error("Database connection '{0}' is not configured")]
    UnknownConnection(String),

    /// The connection is configured with maintenance mode on.
    #[error("Database connection '{0}' is in maintenance mode")]
    MaintenanceMode(String),

    /// The builder state could not be compiled. Nothing was sent.
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// The executor reported a failure running a valid statement.
    #[error("Execution error: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The executor returned a result of an unexpected shape.
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (reading configuration files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a driver error as [`Error::Execution`].
    pub fn execution(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Execution(err.into())
    }
}

/// Result type for execution operations.
pub type Result<T> = std::result::Result<T, Error>;
