use std::io;

/// Errors that can occur while building ansible commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty executable")]
    EmptyExecutable,

    #[error("empty docker image name")]
    EmptyImage,

    #[error("no commands to chain")]
    EmptyChain,

    #[error("Unknown run configuration: {0}")]
    UnknownConfiguration(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for ansible-run operations
pub type Result<T> = std::result::Result<T, Error>;
