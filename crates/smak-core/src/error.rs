//! Error types for smak-core

use thiserror::Error;

/// Result type alias using smak-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in smak-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No authenticated identity at the time a mutating call was issued
    #[error("You must be signed in to perform this action")]
    NotAuthenticated,

    /// Record not found in the remote collection
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Remote store rejected or failed a request
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Identity provider error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Draft persistence error
    #[error("Draft storage error: {0}")]
    Draft(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
