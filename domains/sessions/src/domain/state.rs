//! State machine for a user's session lifecycle
//!
//! Sessions: Uninitialized → Active on launch; launches keep it Active
//! (with a fresh thread under the default policy). Queries never change
//! state and are only valid once Active. There is no terminal state.

pub use voxthread_common::StateError;

use crate::domain::entities::{LaunchThreadPolicy, SessionRecord};

/// Session states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No usable session record
    Uninitialized,
    /// Record with an assistant and a thread
    Active(SessionRecord),
}

impl SessionState {
    /// State implied by what the store returned
    pub fn of(record: Option<SessionRecord>) -> Self {
        match record {
            Some(record) => Self::Active(record),
            None => Self::Uninitialized,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Active(_) => write!(f, "active"),
        }
    }
}

/// Work a launch has to do before the record is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// Create an assistant and a thread
    Provision,
    /// Keep the assistant, open a new thread
    Rethread(SessionRecord),
    /// Keep the record as it is
    Resume(SessionRecord),
}

/// Session state machine
pub struct SessionStateMachine;

impl SessionStateMachine {
    /// Launch is valid from every state
    pub fn launch(current: SessionState, policy: LaunchThreadPolicy) -> LaunchPlan {
        match (current, policy) {
            (SessionState::Uninitialized, _) => LaunchPlan::Provision,
            (SessionState::Active(record), LaunchThreadPolicy::NewThreadPerLaunch) => {
                LaunchPlan::Rethread(record)
            }
            (SessionState::Active(record), LaunchThreadPolicy::ReuseThread) => {
                LaunchPlan::Resume(record)
            }
        }
    }

    /// Record a query runs against; fails before the first launch
    pub fn query(current: SessionState) -> Result<SessionRecord, StateError> {
        match current {
            SessionState::Active(record) => Ok(record),
            SessionState::Uninitialized => Err(StateError::GuardFailed(
                "query requires a launched session".to_string(),
            )),
        }
    }
}
