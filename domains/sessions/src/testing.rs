//! Test fixtures shared by the handler tests

use std::sync::Arc;

use voxthread_assistant::mock::MockAssistantService;

use crate::api::SkillState;
use crate::config::SkillConfig;
use crate::repository::InMemorySessionRepository;

/// Skill state wired to an in-memory store and a mock assistant, plus
/// handles to both for seeding and assertions
pub(crate) struct Fixture {
    pub state: SkillState,
    pub store: InMemorySessionRepository,
    pub assistant: MockAssistantService,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(SkillConfig::default())
    }

    pub fn with_config(config: SkillConfig) -> Self {
        let store = InMemorySessionRepository::new();
        let assistant = MockAssistantService::new();
        let state = SkillState::new(
            Arc::new(store.clone()),
            Arc::new(assistant.clone()),
            config,
            None,
        );
        Self {
            state,
            store,
            assistant,
        }
    }
}
