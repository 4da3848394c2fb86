//! Sessions domain: skill event dispatch, session records, assistant relay

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{LaunchThreadPolicy, SessionAttributes, SessionRecord};
pub use domain::speech::SkillReply;
pub use domain::state::{LaunchPlan, SessionState, SessionStateMachine, StateError};

// Re-export repository types
pub use repository::{RepositoryConfig, SessionRepository, SessionRepositoryFactory};

pub use config::SkillConfig;
pub use error::SkillError;

// Re-export API types
pub use api::dispatch::{dispatch, respond, SkillEvent};
pub use api::envelope::{RequestEnvelope, ResponseEnvelope};
pub use api::routes;
pub use api::SkillState;
