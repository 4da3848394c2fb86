//! Common state machine error types

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Guard condition failed: {0}")]
    GuardFailed(String),
}
