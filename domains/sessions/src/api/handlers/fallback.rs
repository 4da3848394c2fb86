//! Catch-all for errors that reach the dispatcher boundary

use crate::domain::speech::{SkillReply, FALLBACK_APOLOGY, PLEASE_TRY_AGAIN};
use crate::error::SkillError;

/// Log the error and apologise
pub fn handle(error: &SkillError) -> SkillReply {
    tracing::error!(kind = error.kind(), error = %error, "Unhandled skill error");
    SkillReply::ask(FALLBACK_APOLOGY, PLEASE_TRY_AGAIN)
}
