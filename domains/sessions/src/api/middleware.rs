//! Sessions domain state

use std::sync::Arc;

use voxthread_assistant::AssistantService;
use voxthread_common::{Error, Result};

use crate::api::envelope::RequestEnvelope;
use crate::config::SkillConfig;
use crate::repository::SessionRepository;

/// Application state for the Sessions domain
#[derive(Clone)]
pub struct SkillState {
    pub sessions: Arc<dyn SessionRepository>,
    pub assistant: Arc<dyn AssistantService>,
    pub config: SkillConfig,
    /// Only envelopes from this application id are accepted, when set
    pub skill_id: Option<String>,
}

impl SkillState {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        assistant: Arc<dyn AssistantService>,
        config: SkillConfig,
        skill_id: Option<String>,
    ) -> Self {
        Self {
            sessions,
            assistant,
            config,
            skill_id,
        }
    }

    /// Reject envelopes addressed to another skill when a skill id is set
    pub fn verify_application(&self, envelope: &RequestEnvelope) -> Result<()> {
        let Some(expected) = self.skill_id.as_deref() else {
            return Ok(());
        };
        if envelope.application_id() == Some(expected) {
            return Ok(());
        }

        tracing::warn!(
            application_id = ?envelope.application_id(),
            "Rejected request for another skill"
        );
        Err(Error::Authorization(
            "Request is not addressed to this skill".to_string(),
        ))
    }
}
