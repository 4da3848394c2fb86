//! Launch handling through the skill endpoint

use axum::http::StatusCode;
use tower::ServiceExt;

use voxthread_assistant::mock::AssistantOperation;
use voxthread_sessions::{LaunchThreadPolicy, SessionAttributes, SkillConfig};

use crate::common::{envelope, launch_request, parse_envelope, skill_request, SkillTestApp};

#[tokio::test]
async fn test_launch_greets_and_keeps_session_open() {
    let app = SkillTestApp::new();

    let resp = app
        .router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = parse_envelope(resp).await;
    assert_eq!(body.version, "1.0");
    assert_eq!(body.speech(), Some("Chat GPT mode activated."));
    assert_eq!(body.reprompt(), Some("Chat GPT mode activated."));
    assert_eq!(body.response.should_end_session, Some(false));
}

#[tokio::test]
async fn test_new_user_launch_provisions_once() {
    let app = SkillTestApp::new();

    app.router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();

    let stored = app.store.attributes("U1").unwrap();
    assert!(stored.assistant_id.is_some());
    assert!(stored.thread_id.is_some());
    assert_eq!(app.assistant.call_count(AssistantOperation::CreateAssistant), 1);
    assert_eq!(app.assistant.call_count(AssistantOperation::CreateThread), 1);
    assert_eq!(app.store.write_count(), 1);
}

#[tokio::test]
async fn test_relaunch_keeps_agent_with_new_thread() {
    let app = SkillTestApp::new();

    app.router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();
    let first = app.store.attributes("U1").unwrap();

    app.router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();
    let second = app.store.attributes("U1").unwrap();

    assert_eq!(first.assistant_id, second.assistant_id);
    assert_ne!(first.thread_id, second.thread_id);
    assert_eq!(app.assistant.call_count(AssistantOperation::CreateAssistant), 1);
    assert_eq!(app.assistant.call_count(AssistantOperation::CreateThread), 2);
}

#[tokio::test]
async fn test_relaunch_with_reuse_policy_keeps_thread() {
    let app = SkillTestApp::with(
        SkillConfig {
            thread_policy: LaunchThreadPolicy::ReuseThread,
            ..SkillConfig::default()
        },
        None,
    );
    app.store.seed(
        "U1",
        SessionAttributes {
            assistant_id: Some("A1".to_string()),
            thread_id: Some("T1".to_string()),
        },
    );

    app.router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();

    let stored = app.store.attributes("U1").unwrap();
    assert_eq!(stored.assistant_id.as_deref(), Some("A1"));
    assert_eq!(stored.thread_id.as_deref(), Some("T1"));
    assert!(app.assistant.calls().is_empty());
}

#[tokio::test]
async fn test_launch_provisioning_failure_apologises() {
    let app = SkillTestApp::new();
    app.assistant.fail_on(AssistantOperation::CreateAssistant);

    let resp = app
        .router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = parse_envelope(resp).await;
    assert_eq!(
        body.speech(),
        Some("Sorry, I had trouble processing your request. Please try again.")
    );
    assert_eq!(body.reprompt(), Some("Please try again."));
    assert!(app.store.attributes("U1").is_none());
}

#[tokio::test]
async fn test_launch_store_failure_apologises() {
    let app = SkillTestApp::new();
    app.store.fail_writes(true);

    let resp = app
        .router()
        .oneshot(skill_request(&envelope("U1", launch_request())))
        .await
        .unwrap();

    let body = parse_envelope(resp).await;
    assert_eq!(
        body.speech(),
        Some("Sorry, I had trouble processing your request. Please try again.")
    );
}
