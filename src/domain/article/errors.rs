//! Article Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}
