//! Error types shared by every pipeline step

use thiserror::Error;

/// Result type alias for step operations
pub type Result<T> = std::result::Result<T, StepError>;

/// Main error type for the step library
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Argument error: {0}")]
    ArgumentError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Dataset not found: {name} (version {version})")]
    DatasetNotFound { name: String, version: u32 },

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for StepError {
    fn from(err: polars::error::PolarsError) -> Self {
        StepError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for StepError {
    fn from(err: serde_json::Error) -> Self {
        StepError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for StepError {
    fn from(err: reqwest::Error) -> Self {
        StepError::NetworkError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for StepError {
    fn from(err: ndarray::ShapeError) -> Self {
        StepError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
