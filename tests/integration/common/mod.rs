//! Common test utilities and fixtures for integration tests
//!
//! Builds the full application router over an in-memory session store and a
//! mock assistant, and provides envelope builders and response helpers.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, Response},
    Router,
};
use serde_json::{json, Value};

use voxthread_assistant::mock::MockAssistantService;
use voxthread_sessions::repository::InMemorySessionRepository;
use voxthread_sessions::{ResponseEnvelope, SkillConfig, SkillState};

pub const SKILL_ID: &str = "amzn1.ask.skill.test";

/// Full application over in-memory collaborators
pub struct SkillTestApp {
    pub store: InMemorySessionRepository,
    pub assistant: MockAssistantService,
    state: SkillState,
}

impl SkillTestApp {
    pub fn new() -> Self {
        Self::with(SkillConfig::default(), None)
    }

    /// Application that only accepts envelopes from `SKILL_ID`
    pub fn restricted() -> Self {
        Self::with(SkillConfig::default(), Some(SKILL_ID.to_string()))
    }

    pub fn with(config: SkillConfig, skill_id: Option<String>) -> Self {
        let store = InMemorySessionRepository::new();
        let assistant = MockAssistantService::new();
        let state = SkillState::new(
            Arc::new(store.clone()),
            Arc::new(assistant.clone()),
            config,
            skill_id,
        );
        Self {
            store,
            assistant,
            state,
        }
    }

    pub fn router(&self) -> Router {
        voxthread_app::router(self.state.clone())
    }

    pub fn state(&self) -> &SkillState {
        &self.state
    }
}

/// Envelope for `user_id` carrying `request`
pub fn envelope(user_id: &str, request: Value) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": false,
            "sessionId": "amzn1.echo-api.session.test",
            "application": {"applicationId": SKILL_ID},
            "user": {"userId": user_id}
        },
        "context": {
            "System": {
                "application": {"applicationId": SKILL_ID},
                "user": {"userId": user_id}
            }
        },
        "request": request
    })
}

pub fn launch_request() -> Value {
    json!({
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.launch",
        "timestamp": "2024-05-01T12:00:00Z",
        "locale": "en-US"
    })
}

pub fn query_request(utterance: &str) -> Value {
    json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.query",
        "locale": "en-US",
        "intent": {
            "name": "GptQueryIntent",
            "confirmationStatus": "NONE",
            "slots": {"query": {"name": "query", "value": utterance}}
        }
    })
}

/// POST a JSON body to the skill endpoint
pub fn skill_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/v1/skill")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Parse response body as a platform response envelope
pub async fn parse_envelope(response: Response<Body>) -> ResponseEnvelope {
    serde_json::from_value(parse_body(response).await).unwrap()
}
