//! Domain entities for the Sessions domain
//!
//! A user's session is the pair of ids tying them to a provisioned assistant
//! and the thread their current conversation lives in.

use serde::{Deserialize, Serialize};

/// Session attributes exactly as persisted.
///
/// Either field may be missing in storage (never written, or written by an
/// older deployment). Use [`SessionRecord::from_attributes`] to get a usable
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl SessionAttributes {
    /// Exactly one of the two ids is present
    pub fn is_inconsistent(&self) -> bool {
        present(&self.assistant_id) != present(&self.thread_id)
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// A complete session: both ids present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub agent_id: String,
    pub thread_id: String,
}

impl SessionRecord {
    pub fn new(agent_id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            thread_id: thread_id.into(),
        }
    }

    /// Build a record only when both ids are present and non-empty
    pub fn from_attributes(attributes: &SessionAttributes) -> Option<Self> {
        match (&attributes.assistant_id, &attributes.thread_id) {
            (Some(agent_id), Some(thread_id)) if !agent_id.is_empty() && !thread_id.is_empty() => {
                Some(Self::new(agent_id.clone(), thread_id.clone()))
            }
            _ => None,
        }
    }

    pub fn to_attributes(&self) -> SessionAttributes {
        SessionAttributes {
            assistant_id: Some(self.agent_id.clone()),
            thread_id: Some(self.thread_id.clone()),
        }
    }

    /// Same agent, different thread
    pub fn with_thread(self, thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            ..self
        }
    }
}

/// What a launch does to a returning user's thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaunchThreadPolicy {
    /// Every launch starts a fresh thread; history lasts one session
    #[default]
    #[serde(rename = "new")]
    NewThreadPerLaunch,
    /// Launches keep the stored thread; history spans sessions
    #[serde(rename = "reuse")]
    ReuseThread,
}

impl std::fmt::Display for LaunchThreadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchThreadPolicy::NewThreadPerLaunch => write!(f, "new"),
            LaunchThreadPolicy::ReuseThread => write!(f, "reuse"),
        }
    }
}

impl std::str::FromStr for LaunchThreadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(LaunchThreadPolicy::NewThreadPerLaunch),
            "reuse" => Ok(LaunchThreadPolicy::ReuseThread),
            other => Err(format!(
                "Unknown launch thread policy: {}. Supported policies: new, reuse",
                other
            )),
        }
    }
}
