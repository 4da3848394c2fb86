//! Shared persistence types for Voxthread
//!
//! Error type returned by session store adapters (DynamoDB, in-memory).

use thiserror::Error;

/// Session store error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Session store configuration error: {0}")]
    Configuration(String),

    #[error("Session store backend error: {0}")]
    Backend(String),

    #[error("Invalid session data: {0}")]
    InvalidData(String),
}
