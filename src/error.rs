use thiserror::Error;

pub type ScrollyResult<T> = Result<T, ScrollyError>;

#[derive(Debug, Error)]
pub enum ScrollyError {
    #[error("stage index out of range: index={index}, len={len}")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown visualization: {0}")]
    UnknownVisualization(String),

    #[error("visualization id already registered: {0}")]
    DuplicateId(String),

    #[error("invalid stage at index {index}: {reason}")]
    InvalidStage { index: usize, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("chart update failed: {0}")]
    ChartFailure(String),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
