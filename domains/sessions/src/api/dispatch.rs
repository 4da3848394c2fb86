//! Event dispatch
//!
//! Turns a decoded platform request into a `SkillEvent` and routes it to its
//! handler. `respond` is the boundary: whatever happens, it returns a reply.

use crate::api::envelope::{PlatformRequest, RequestEnvelope};
use crate::api::handlers::{fallback, launch, query};
use crate::api::middleware::SkillState;
use crate::domain::speech::{SkillReply, PLEASE_TRY_AGAIN, SLOT_MISSING};
use crate::error::SkillError;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// Intent carrying free-form user speech
pub const QUERY_INTENT: &str = "GptQueryIntent";
/// Slot of `QUERY_INTENT` holding the utterance
pub const QUERY_SLOT: &str = "query";

/// Events the skill understands
#[derive(Debug, Clone, PartialEq)]
pub enum SkillEvent {
    Launch,
    /// `utterance` is `None` when the slot is missing altogether
    Query { utterance: Option<String> },
    SessionEnded { reason: Option<String> },
    Unhandled { description: String },
}

impl SkillEvent {
    pub fn from_request(request: &PlatformRequest) -> Self {
        match request.request_type.as_str() {
            LAUNCH_REQUEST => SkillEvent::Launch,
            INTENT_REQUEST => match &request.intent {
                Some(intent) if intent.name == QUERY_INTENT => SkillEvent::Query {
                    utterance: intent
                        .slot(QUERY_SLOT)
                        .map(|slot| slot.value.clone().unwrap_or_default()),
                },
                Some(intent) => SkillEvent::Unhandled {
                    description: format!("{} {}", INTENT_REQUEST, intent.name),
                },
                None => SkillEvent::Unhandled {
                    description: format!("{} without intent", INTENT_REQUEST),
                },
            },
            SESSION_ENDED_REQUEST => SkillEvent::SessionEnded {
                reason: request.reason.clone(),
            },
            other => SkillEvent::Unhandled {
                description: other.to_string(),
            },
        }
    }
}

/// Route an event to its handler
pub async fn dispatch(
    state: &SkillState,
    user_id: Option<&str>,
    event: SkillEvent,
) -> Result<SkillReply, SkillError> {
    match event {
        SkillEvent::Launch => {
            let user_id = user_id.ok_or(SkillError::MissingIdentity)?;
            launch::initialize_session(state, user_id).await
        }
        SkillEvent::Query {
            utterance: Some(utterance),
        } => {
            let user_id = user_id.ok_or(SkillError::MissingIdentity)?;
            Ok(query::relay(state, user_id, &utterance).await)
        }
        SkillEvent::Query { utterance: None } => {
            tracing::warn!("Query intent without a query slot");
            Ok(SkillReply::ask(SLOT_MISSING, PLEASE_TRY_AGAIN))
        }
        SkillEvent::SessionEnded { reason } => {
            tracing::info!(reason = ?reason, "Session ended");
            Ok(SkillReply::silent())
        }
        SkillEvent::Unhandled { description } => Err(SkillError::UnhandledEvent(description)),
    }
}

/// Dispatch an envelope, converting any error into the fallback reply
pub async fn respond(state: &SkillState, envelope: &RequestEnvelope) -> SkillReply {
    let event = SkillEvent::from_request(&envelope.request);
    tracing::debug!(
        request_type = %envelope.request.request_type,
        request_id = ?envelope.request.request_id,
        "Dispatching skill event"
    );

    match dispatch(state, envelope.user_id(), event).await {
        Ok(reply) => reply,
        Err(e) => fallback::handle(&e),
    }
}
