//! Skill behaviour configuration

use crate::domain::entities::LaunchThreadPolicy;
use voxthread_common::Error;

/// Persona given to every newly provisioned assistant
pub const DEFAULT_INSTRUCTIONS: &str = "You are an AI English language tutor designed to teach \
English to non-native speakers. Your goal is to provide clear, engaging, and effective English \
lessons tailored to the student's proficiency level. !!IMPORTANT Answer with 2 lines max with 30 \
letters in max";

/// How the skill provisions assistants and threads
#[derive(Debug, Clone, PartialEq)]
pub struct SkillConfig {
    /// Instruction payload (persona + response-length constraint)
    pub instructions: String,
    /// Display name for provisioned assistants
    pub assistant_name: Option<String>,
    /// Whether a launch replaces a returning user's thread
    pub thread_policy: LaunchThreadPolicy,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            assistant_name: None,
            thread_policy: LaunchThreadPolicy::default(),
        }
    }
}

impl SkillConfig {
    /// Create skill config from environment variables
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let instructions = std::env::var("SKILL_ASSISTANT_INSTRUCTIONS")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string());

        let assistant_name = std::env::var("SKILL_ASSISTANT_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let thread_policy = match std::env::var("SKILL_LAUNCH_THREAD_POLICY") {
            Ok(raw) => raw.parse().map_err(Error::Validation)?,
            Err(_) => LaunchThreadPolicy::default(),
        };

        Ok(Self {
            instructions,
            assistant_name,
            thread_policy,
        })
    }
}
