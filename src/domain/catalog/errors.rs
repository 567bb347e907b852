//! Catalog Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("Unknown book status: {0}")]
    InvalidStatus(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Message cannot be empty")]
    EmptyMessage,
}
