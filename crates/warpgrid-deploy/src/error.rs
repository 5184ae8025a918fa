//! Error types for rollout materialization and configuration loading.

use thiserror::Error;

/// Result type alias for fallible rollout operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors surfaced to the caller. The decision functions themselves never fail.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid rollout config: {0}")]
    InvalidConfig(String),

    #[error("invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("unknown lifecycle phase: {0}")]
    UnknownPhase(String),

    #[error("failed to encode rollout config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to parse rollout config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render rollout config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
