//! HTTP entry point for platform requests

use axum::{extract::State, Json};
use voxthread_common::{JsonBody, Result};

use crate::api::dispatch::respond;
use crate::api::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::api::middleware::SkillState;

/// Handle one platform request envelope.
///
/// Always answers 200 with a response envelope once the body parses, except
/// when a skill id is configured and the envelope comes from another one.
pub async fn handle_skill_request(
    State(state): State<SkillState>,
    JsonBody(envelope): JsonBody<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>> {
    state.verify_application(&envelope)?;

    let reply = respond(&state, &envelope).await;
    Ok(Json(reply.into()))
}
