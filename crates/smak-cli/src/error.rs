use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] smak_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Recipe ID cannot be empty")]
    EmptyRecipeId,
    #[error("Invalid recipe ID: {0}")]
    InvalidRecipeId(String),
    #[error("No comment text provided")]
    EmptyComment,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("{0}")]
    Recipe(String),
}
