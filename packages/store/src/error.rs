use thiserror::Error;

/// Errors raised while reading session data or configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid profile data: {0}")]
    InvalidProfile(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
