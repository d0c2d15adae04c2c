use thiserror::Error;

/// Top-level error type for the Paraíso system.
///
/// Covers startup work: configuration, dataset loading and server binding.
/// Per-request failures use the subsystem crates' own error types.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParaisoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ParaisoError {
    fn from(err: toml::de::Error) -> Self {
        ParaisoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ParaisoError {
    fn from(err: toml::ser::Error) -> Self {
        ParaisoError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ParaisoError {
    fn from(err: serde_json::Error) -> Self {
        ParaisoError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Paraíso operations.
pub type Result<T> = std::result::Result<T, ParaisoError>;
