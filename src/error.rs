//! Error types

use thiserror::Error;

/// Errors raised while loading data, building a tree, predicting or scoring.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Invalid class label {value} in row {row}: labels must be non-negative integers")]
    InvalidLabel { row: usize, value: String },

    #[error("Length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Malformed row {row}: expected at least {expected} values, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Tree wasn't built yet")]
    NotFitted,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
