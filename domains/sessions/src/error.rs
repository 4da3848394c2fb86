//! Errors raised while handling a skill event
//!
//! None of these reach the platform as a failure: the dispatcher boundary
//! turns every `SkillError` into the fallback apology.

use thiserror::Error;
use voxthread_assistant::AssistantError;
use voxthread_common::RepositoryError;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Session store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Assistant service error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Request envelope carries no user identity")]
    MissingIdentity,

    #[error("No handler for event: {0}")]
    UnhandledEvent(String),
}

impl SkillError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            SkillError::Repository(_) => "repository",
            SkillError::Assistant(_) => "assistant",
            SkillError::MissingIdentity => "missing_identity",
            SkillError::UnhandledEvent(_) => "unhandled_event",
        }
    }
}
