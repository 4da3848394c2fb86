//! Spoken replies
//!
//! Every handler produces a `SkillReply`; the API layer wraps it in the
//! platform response envelope.

/// Greeting spoken (and re-prompted) when a session is launched
pub const LAUNCH_GREETING: &str = "Chat GPT mode activated.";

/// Query arrived with no session record
pub const LOST_MEMORY: &str = "Sorry, I lost my memory. Please restart.";

/// Run finished with any status other than completed
pub const UNEXPECTED_RUN: &str = "Something unexpected happened. Let's restart.";

/// Thread listing had no usable text reply
pub const CANT_SPEAK: &str = "Can't speak right now. Try again.";

/// Store or assistant call failed during a query
pub const TECHNICAL_DIFFICULTIES: &str = "Technical difficulties. Try again later.";

/// Re-prompt after every relayed reply
pub const RELAY_REPROMPT: &str = "...";

/// Query intent arrived without its slot
pub const SLOT_MISSING: &str = "Sorry, try again.";

/// Apology for anything the handlers could not deal with
pub const FALLBACK_APOLOGY: &str = "Sorry, I had trouble processing your request. Please try again.";

/// Re-prompt after a missing slot or the fallback apology
pub const PLEASE_TRY_AGAIN: &str = "Please try again.";

/// Speech and re-prompt text returned to the platform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillReply {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
}

impl SkillReply {
    /// Speak, then keep the session open with a re-prompt
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech: Some(speech.into()),
            reprompt: Some(reprompt.into()),
        }
    }

    /// Say nothing (session already ended on the platform side)
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn keeps_session_open(&self) -> bool {
        self.reprompt.is_some()
    }
}
