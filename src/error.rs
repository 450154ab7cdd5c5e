//! Custom errors for the planning library.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("node index {index} out of bounds, tree holds {len} nodes")]
    InvalidIndex { index: usize, len: usize },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlanningResult<T> = std::result::Result<T, PlanningError>;
