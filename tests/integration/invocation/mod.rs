//! Direct invocation: the raw platform envelope as the function payload

use axum::http::StatusCode;
use serde_json::json;

use voxthread_app::handle_envelope;
use voxthread_sessions::RequestEnvelope;

use crate::common::{envelope, launch_request, query_request, SkillTestApp};

/// LaunchRequest exactly as the platform delivers it to the function
const LAUNCH_EVENT: &str = r#"{
    "version": "1.0",
    "session": {
        "new": true,
        "sessionId": "amzn1.echo-api.session.0000",
        "application": {"applicationId": "amzn1.ask.skill.test"},
        "attributes": {},
        "user": {"userId": "amzn1.ask.account.U1"}
    },
    "context": {
        "System": {
            "application": {"applicationId": "amzn1.ask.skill.test"},
            "user": {"userId": "amzn1.ask.account.U1"},
            "device": {"deviceId": "amzn1.ask.device.0000", "supportedInterfaces": {}},
            "apiEndpoint": "https://api.amazonalexa.com",
            "apiAccessToken": "token"
        }
    },
    "request": {
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.0000",
        "timestamp": "2024-05-01T12:00:00Z",
        "locale": "en-US",
        "shouldLinkResultBeReturned": false
    }
}"#;

fn parse(value: serde_json::Value) -> RequestEnvelope {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_launch_event_is_answered_directly() {
    let app = SkillTestApp::restricted();
    let event: RequestEnvelope = serde_json::from_str(LAUNCH_EVENT).unwrap();

    let response = handle_envelope(app.state(), event).await.unwrap();

    assert_eq!(response.version, "1.0");
    assert_eq!(response.speech(), Some("Chat GPT mode activated."));
    assert_eq!(response.response.should_end_session, Some(false));
    assert!(app.store.attributes("amzn1.ask.account.U1").is_some());

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["sessionAttributes"], json!({}));
    assert_eq!(wire["response"]["outputSpeech"]["type"], "PlainText");
}

#[tokio::test]
async fn test_launch_then_query_by_invocation() {
    let app = SkillTestApp::new();

    handle_envelope(app.state(), parse(envelope("U1", launch_request())))
        .await
        .unwrap();
    let response = handle_envelope(app.state(), parse(envelope("U1", query_request("hi"))))
        .await
        .unwrap();

    assert_eq!(response.speech(), Some("Mock reply to: hi"));
    assert_eq!(response.reprompt(), Some("..."));
}

#[tokio::test]
async fn test_query_without_session_is_spoken_apology() {
    let app = SkillTestApp::new();

    let response = handle_envelope(app.state(), parse(envelope("U1", query_request("hi"))))
        .await
        .unwrap();

    assert_eq!(
        response.speech(),
        Some("Sorry, I lost my memory. Please restart.")
    );
    assert!(app.assistant.calls().is_empty());
}

#[tokio::test]
async fn test_foreign_skill_invocation_is_rejected() {
    let app = SkillTestApp::restricted();
    let mut body = envelope("U1", launch_request());
    body["context"]["System"]["application"]["applicationId"] = json!("amzn1.ask.skill.other");
    body["session"]["application"]["applicationId"] = json!("amzn1.ask.skill.other");

    let err = handle_envelope(app.state(), parse(body)).await.unwrap_err();

    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.read_count(), 0);
}
