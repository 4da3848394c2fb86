//! Voxthread Assistant Service
//!
//! Client for the conversational-AI side of the skill:
//! - Provision an assistant (persona + instructions + model)
//! - Create conversation threads
//! - Post a message, run the assistant to a terminal status, list replies
//!
//! Implementations:
//! - OpenAI Assistants v2 HTTP API for production
//! - Programmable mock for testing and local development

pub mod mock;
pub mod openai;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_RUN_TIMEOUT_SECS: u64 = 25;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant configuration error: {0}")]
    Configuration(String),

    #[error("Assistant request error: {0}")]
    Request(String),

    #[error("Assistant response error: {0}")]
    Response(String),

    #[error("Assistant API rate limit exceeded")]
    RateLimit,

    #[error("Run {run_id} did not finish within {waited:?}")]
    Timeout { run_id: String, waited: Duration },
}

/// Author of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Lifecycle status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    /// A status this client does not know about
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether polling should stop at this status.
    ///
    /// `RequiresAction` stops polling because nothing here submits tool
    /// outputs; unknown statuses stop it because they cannot be waited out.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::InProgress | Self::Cancelling)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One execution of an assistant against a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
}

/// A content block of a thread message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    /// Non-text block (image, file reference, ...), keyed by its type name
    Other(String),
}

impl MessageContent {
    /// Text value if this block is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Other(_) => None,
        }
    }
}

/// A message in a thread
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    /// Assistant message with a single text block
    pub fn assistant_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Assistant,
            content: vec![MessageContent::Text(text.into())],
        }
    }
}

/// Parameters for provisioning an assistant
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAssistantRequest {
    pub model: String,
    pub instructions: String,
    pub name: Option<String>,
}

/// Assistant service configuration.
#[derive(Clone)]
pub struct AssistantConfig {
    /// Assistant provider (openai, mock)
    pub provider: String,
    /// API key for the provider
    pub api_key: String,
    /// Override for the API base URL
    pub base_url: Option<String>,
    /// Model used when provisioning assistants
    pub default_model: String,
    /// Delay between run status polls
    pub poll_interval: Duration,
    /// Upper bound on waiting for a run to reach a terminal status
    pub run_timeout: Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("poll_interval", &self.poll_interval)
            .field("run_timeout", &self.run_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            base_url: None,
            default_model: DEFAULT_MODEL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            run_timeout: Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AssistantConfig {
    /// Create assistant config from environment variables.
    pub fn from_env() -> Result<Self, AssistantError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("ASSISTANT_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        if provider == "openai" && api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "OPENAI_API_KEY is required for openai provider".to_string(),
            ));
        }

        let base_url = std::env::var("OPENAI_BASE_URL").ok();
        let default_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            provider,
            api_key,
            base_url,
            default_model,
            poll_interval: Duration::from_millis(env_u64(
                "OPENAI_RUN_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?),
            run_timeout: Duration::from_secs(env_u64(
                "OPENAI_RUN_TIMEOUT_SECS",
                DEFAULT_RUN_TIMEOUT_SECS,
            )?),
            request_timeout: Duration::from_secs(env_u64(
                "OPENAI_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64, AssistantError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AssistantError::Configuration(format!("{} must be a non-negative integer", name))
        }),
        Err(_) => Ok(default),
    }
}

/// Conversation service trait for different implementations.
#[async_trait::async_trait]
pub trait AssistantService: Send + Sync {
    /// Provision an assistant and return its id.
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<String, AssistantError>;

    /// Create an empty thread and return its id.
    async fn create_thread(&self) -> Result<String, AssistantError>;

    /// Append a message to a thread.
    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run of `assistant_id` on `thread_id` and wait for a terminal status.
    async fn run_and_await(&self, thread_id: &str, assistant_id: &str)
        -> Result<Run, AssistantError>;

    /// List thread messages, most recent first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError>;

    /// Model used when a provisioning request does not name one
    fn default_model(&self) -> &str;
}

/// Factory for creating AssistantService implementations.
pub struct AssistantServiceFactory;

impl AssistantServiceFactory {
    /// Create an AssistantService based on configuration.
    pub fn create(config: AssistantConfig) -> Result<Box<dyn AssistantService>, AssistantError> {
        match config.provider.as_str() {
            "openai" => {
                tracing::info!(model = %config.default_model, "Creating OpenAI assistant service");
                Ok(Box::new(openai::OpenAiAssistantService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock assistant service");
                Ok(Box::new(mock::MockAssistantService::new()))
            }
            provider => Err(AssistantError::Configuration(format!(
                "Unknown assistant provider: {}. Supported providers: openai, mock",
                provider
            ))),
        }
    }
}
