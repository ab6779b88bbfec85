//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A data point could not be handed to the monitoring backend.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to write data point: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode data point: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("data point rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to fetch credentials for IAM role {role}: {reason}")]
    Lookup { role: String, reason: String },

    #[error("no instance metadata service is available")]
    Unavailable,

    #[error("incomplete static credentials: {0}")]
    Incomplete(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}
