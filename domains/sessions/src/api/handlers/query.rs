//! Query handler: relays an utterance to the user's thread

use voxthread_assistant::{MessageRole, RunStatus, ThreadMessage};

use crate::api::middleware::SkillState;
use crate::domain::entities::SessionRecord;
use crate::domain::speech::{
    SkillReply, CANT_SPEAK, LOST_MEMORY, RELAY_REPROMPT, TECHNICAL_DIFFICULTIES, UNEXPECTED_RUN,
};
use crate::domain::state::{SessionState, SessionStateMachine};
use crate::error::SkillError;

/// Relay an utterance and speak the assistant's latest reply.
///
/// Never fails: every failure is logged and mapped to a spoken message.
pub async fn relay(state: &SkillState, user_id: &str, utterance: &str) -> SkillReply {
    let record = match state.sessions.get(user_id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to read session record");
            return SkillReply::ask(TECHNICAL_DIFFICULTIES, RELAY_REPROMPT);
        }
    };

    let record = match SessionStateMachine::query(SessionState::of(record)) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Query without a session");
            return SkillReply::ask(LOST_MEMORY, RELAY_REPROMPT);
        }
    };

    let speech = match exchange(state, &record, utterance).await {
        Ok(speech) => speech,
        Err(e) => {
            tracing::error!(
                user_id = %user_id,
                thread_id = %record.thread_id,
                error = %e,
                "Relay failed"
            );
            TECHNICAL_DIFFICULTIES.to_string()
        }
    };

    SkillReply::ask(speech, RELAY_REPROMPT)
}

/// Post, run, and read back. Returns the text to speak.
async fn exchange(
    state: &SkillState,
    record: &SessionRecord,
    utterance: &str,
) -> Result<String, SkillError> {
    state
        .assistant
        .post_message(&record.thread_id, MessageRole::User, utterance)
        .await?;

    let run = state
        .assistant
        .run_and_await(&record.thread_id, &record.agent_id)
        .await?;

    if run.status != RunStatus::Completed {
        tracing::warn!(
            thread_id = %record.thread_id,
            run_id = %run.id,
            status = %run.status,
            "Run did not complete"
        );
        return Ok(UNEXPECTED_RUN.to_string());
    }

    let messages = state.assistant.list_messages(&record.thread_id).await?;

    Ok(match extract_reply(&messages) {
        Some(text) => text,
        None => {
            tracing::warn!(
                thread_id = %record.thread_id,
                messages = messages.len(),
                "No text reply in thread"
            );
            CANT_SPEAK.to_string()
        }
    })
}

/// Trimmed text of the first content block of the most recent message
fn extract_reply(messages: &[ThreadMessage]) -> Option<String> {
    messages
        .first()?
        .content
        .first()?
        .as_text()
        .map(|text| text.trim().to_string())
}
