//! Domain error types for the insights tool.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! The insights engine itself never fails; these errors come from loading and
//! saving report files.

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Reading or writing a file failed
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(err.to_string()),
            _ => AppError::FileSystem(err.to_string()),
        }
    }
}
