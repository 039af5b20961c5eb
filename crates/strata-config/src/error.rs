//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No platform configuration directory could be resolved.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file exists but is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
