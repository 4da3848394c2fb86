//! OpenAI Assistants API Implementation
//!
//! Calls the Assistants v2 endpoints (https://api.openai.com/v1/assistants,
//! /v1/threads, ...) using reqwest HTTP client. Runs are polled until they
//! reach a terminal status or the configured run timeout elapses.

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::time::Instant;

use crate::{
    AssistantConfig, AssistantError, AssistantService, CreateAssistantRequest, MessageContent,
    MessageRole, Run, ThreadMessage,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const ASSISTANTS_BETA: &str = "assistants=v2";
const LIST_LIMIT: &str = "20";

/// Assistant creation request body
#[derive(Debug, Serialize)]
struct CreateAssistantBody {
    model: String,
    instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateMessageBody<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunBody<'a> {
    assistant_id: &'a str,
}

/// Any object response where only the id matters
#[derive(Debug, Deserialize)]
struct ObjectId {
    id: String,
}

/// Thread message list response body
#[derive(Debug, Deserialize)]
struct MessageList {
    data: Vec<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: String,
    role: MessageRole,
    #[serde(default)]
    content: Vec<WireContent>,
}

#[derive(Debug, Deserialize)]
struct WireContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<WireText>,
}

#[derive(Debug, Deserialize)]
struct WireText {
    value: String,
}

impl From<WireMessage> for ThreadMessage {
    fn from(message: WireMessage) -> Self {
        let content = message
            .content
            .into_iter()
            .map(|block| {
                if block.content_type == "text" {
                    if let Some(text) = block.text {
                        return MessageContent::Text(text.value);
                    }
                }
                MessageContent::Other(block.content_type)
            })
            .collect();

        ThreadMessage {
            id: message.id,
            role: message.role,
            content,
        }
    }
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

/// OpenAI Assistants service implementation
pub struct OpenAiAssistantService {
    client: Client,
    config: AssistantConfig,
    base_url: String,
}

impl OpenAiAssistantService {
    /// Create a new OpenAI assistant service
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "OpenAI API key must not be empty".to_string(),
            ));
        }

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AssistantError::Configuration(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AssistantError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| AssistantError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AssistantError::RateLimit);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(AssistantError::Response(format!(
                    "OpenAI API error ({}): {}",
                    error_response
                        .error
                        .error_type
                        .as_deref()
                        .unwrap_or("unknown"),
                    error_response.error.message
                )));
            }

            return Err(AssistantError::Response(format!(
                "OpenAI API returned {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AssistantError::Response(format!("Failed to parse response: {}", e)))
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AssistantError> {
        let url = self.url(&format!("/threads/{}/runs/{}", thread_id, run_id));
        self.send(self.client.get(&url)).await
    }
}

#[async_trait::async_trait]
impl AssistantService for OpenAiAssistantService {
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<String, AssistantError> {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model
        };

        tracing::debug!(model = %model, "Creating OpenAI assistant");

        let body = CreateAssistantBody {
            model,
            instructions: request.instructions,
            name: request.name,
        };

        let created: ObjectId = self
            .send(self.client.post(self.url("/assistants")).json(&body))
            .await?;
        Ok(created.id)
    }

    async fn create_thread(&self) -> Result<String, AssistantError> {
        let created: ObjectId = self
            .send(
                self.client
                    .post(self.url("/threads"))
                    .json(&serde_json::json!({})),
            )
            .await?;
        Ok(created.id)
    }

    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError> {
        let url = self.url(&format!("/threads/{}/messages", thread_id));
        let _: ObjectId = self
            .send(
                self.client
                    .post(&url)
                    .json(&CreateMessageBody { role, content }),
            )
            .await?;
        Ok(())
    }

    async fn run_and_await(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<Run, AssistantError> {
        let url = self.url(&format!("/threads/{}/runs", thread_id));
        let started = Instant::now();

        let mut run: Run = self
            .send(self.client.post(&url).json(&CreateRunBody { assistant_id }))
            .await?;

        tracing::debug!(run_id = %run.id, thread_id = %thread_id, "Run created, polling for completion");

        while !run.status.is_terminal() {
            if started.elapsed() >= self.config.run_timeout {
                return Err(AssistantError::Timeout {
                    run_id: run.id,
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
            run = self.retrieve_run(thread_id, &run.id).await?;
        }

        tracing::debug!(
            run_id = %run.id,
            status = %run.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Run reached terminal status"
        );

        Ok(run)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        let url = self.url(&format!("/threads/{}/messages", thread_id));
        let list: MessageList = self
            .send(
                self.client
                    .get(&url)
                    .query(&[("order", "desc"), ("limit", LIST_LIMIT)]),
            )
            .await?;

        Ok(list.data.into_iter().map(ThreadMessage::from).collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
