//! Route definitions for Sessions domain API

use axum::{routing::post, Router};

use super::handlers::skill;
use super::middleware::SkillState;

/// Create all Sessions domain API routes
pub fn routes() -> Router<SkillState> {
    Router::new().route("/v1/skill", post(skill::handle_skill_request))
}
