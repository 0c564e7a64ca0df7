use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// Invalid layer sizes, pinned weights, or driver settings. Construction fails outright.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// `feed_forward` was given a vector whose length differs from the input layer.
    /// Nothing is mutated; the caller may retry with a corrected input.
    #[error("input size mismatch: expected {expected} values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
