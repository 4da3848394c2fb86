//! Launch handler: provisions the assistant and thread for a user

use voxthread_assistant::CreateAssistantRequest;

use crate::api::middleware::SkillState;
use crate::domain::entities::SessionRecord;
use crate::domain::speech::{SkillReply, LAUNCH_GREETING};
use crate::domain::state::{LaunchPlan, SessionState, SessionStateMachine};
use crate::error::SkillError;

/// Make sure the user has an assistant and a thread to talk in.
///
/// First launch provisions both. Later launches keep the assistant and, under
/// the default policy, start a fresh thread. The record is written exactly
/// once. Failures propagate to the fallback handler.
pub async fn initialize_session(
    state: &SkillState,
    user_id: &str,
) -> Result<SkillReply, SkillError> {
    let current = SessionState::of(state.sessions.get(user_id).await?);
    let from = current.to_string();

    let record = match SessionStateMachine::launch(current, state.config.thread_policy) {
        LaunchPlan::Provision => {
            let agent_id = provision_assistant(state).await?;
            let thread_id = state.assistant.create_thread().await?;
            SessionRecord::new(agent_id, thread_id)
        }
        LaunchPlan::Rethread(record) => {
            let thread_id = state.assistant.create_thread().await?;
            record.with_thread(thread_id)
        }
        LaunchPlan::Resume(record) => record,
    };

    state.sessions.put(user_id, &record).await?;

    tracing::info!(
        user_id = %user_id,
        agent_id = %record.agent_id,
        thread_id = %record.thread_id,
        from = %from,
        policy = %state.config.thread_policy,
        "Session launched"
    );

    Ok(SkillReply::ask(LAUNCH_GREETING, LAUNCH_GREETING))
}

async fn provision_assistant(state: &SkillState) -> Result<String, SkillError> {
    let request = CreateAssistantRequest {
        model: state.assistant.default_model().to_string(),
        instructions: state.config.instructions.clone(),
        name: state.config.assistant_name.clone(),
    };

    let agent_id = state.assistant.create_assistant(request).await?;
    tracing::info!(agent_id = %agent_id, "Provisioned assistant");
    Ok(agent_id)
}
