use thiserror::Error;

use crate::entry::EntryId;

/// Errors surfaced by the hash service boundary.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("secret must not be empty")]
    EmptySecret,

    /// Covers unknown identifiers and entries whose digest is still pending.
    #[error("hash not found")]
    NotFound,

    #[error("service is shutting down")]
    ShuttingDown,

    #[error("completion for entry {0} was abandoned before it finished")]
    Abandoned(EntryId),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
