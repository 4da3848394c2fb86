//! Voxthread application composition root
//!
//! Builds the session store, assistant client and skill config once. The
//! Lambda binary answers raw platform envelopes with them; the local binary
//! serves them through a router.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use voxthread_assistant::{AssistantConfig, AssistantServiceFactory};
use voxthread_common::Config;
use voxthread_sessions::{
    respond, RepositoryConfig, RequestEnvelope, ResponseEnvelope, SessionRepositoryFactory,
    SkillConfig, SkillState,
};

/// Largest accepted request body; platform envelopes are a few KiB
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Build the skill state with all collaborators wired from the environment
pub async fn build_state(config: &Config) -> Result<SkillState, anyhow::Error> {
    let repository_config = RepositoryConfig::from_env()?;
    let sessions = SessionRepositoryFactory::create(repository_config).await?;

    let assistant_config = AssistantConfig::from_env()?;
    tracing::info!(config = ?assistant_config, "Assistant configuration loaded");
    let assistant = AssistantServiceFactory::create(assistant_config)?;

    let skill_config = SkillConfig::from_env()?;

    Ok(SkillState::new(
        Arc::from(sessions),
        Arc::from(assistant),
        skill_config,
        config.skill_id.clone(),
    ))
}

/// Create the main application router with all collaborators wired from the
/// environment
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    Ok(router(build_state(config).await?))
}

/// Router over an already-built state
pub fn router(state: SkillState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Voxthread skill v0.0.1-SNAPSHOT" }),
        )
        .merge(voxthread_sessions::routes().with_state(state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Answer one envelope the platform delivered by direct invocation.
///
/// Same contract as the HTTP endpoint: a foreign skill id is rejected, every
/// other envelope gets a response envelope.
pub async fn handle_envelope(
    state: &SkillState,
    envelope: RequestEnvelope,
) -> voxthread_common::Result<ResponseEnvelope> {
    state.verify_application(&envelope)?;
    Ok(respond(state, &envelope).await.into())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
