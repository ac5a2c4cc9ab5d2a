//! Error types for the docsift CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, extraction, generation
//! service, prompt, and merge/history errors.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the docsift CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input document does not exist
    #[error("File not found at {}", .0.display())]
    NotFound(PathBuf),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text extraction errors (local read or extraction service)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Generation service errors (auth, quota, transport, bad response)
    #[error("Generation error: {0}")]
    Service(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Run history persistence errors
    #[error("History error: {0}")]
    History(String),

    /// Generic pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
