//! Mock Assistant Service Implementation
//!
//! Programmable mock for testing the skill without the OpenAI API:
//! - records every operation and posted message for assertions
//! - run status, thread listing and per-operation failures are configurable
//! - by default runs complete and the reply echoes the last posted message
//!
//! Thread-safe via `Arc<Mutex<>>`; clones share state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::{
    AssistantError, AssistantService, CreateAssistantRequest, MessageRole, Run, RunStatus,
    ThreadMessage,
};

/// Operations of the assistant service, for recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistantOperation {
    CreateAssistant,
    CreateThread,
    PostMessage,
    RunAndAwait,
    ListMessages,
}

/// A message captured by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub thread_id: String,
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug)]
struct MockState {
    run_status: RunStatus,
    messages: Option<Vec<ThreadMessage>>,
    failing: Option<AssistantOperation>,
    calls: Vec<AssistantOperation>,
    posted: Vec<PostedMessage>,
    assistants: HashMap<String, CreateAssistantRequest>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            run_status: RunStatus::Completed,
            messages: None,
            failing: None,
            calls: Vec::new(),
            posted: Vec::new(),
            assistants: HashMap::new(),
        }
    }
}

/// Mock assistant service with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockAssistantService {
    state: Arc<Mutex<MockState>>,
}

impl MockAssistantService {
    /// Create a new mock assistant service
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .expect("mock state lock poisoned: prior test panicked")
    }

    /// Status every subsequent run finishes with
    pub fn set_run_status(&self, status: RunStatus) {
        self.lock().run_status = status;
    }

    /// Fixed message list returned by `list_messages`, most recent first
    pub fn set_messages(&self, messages: Vec<ThreadMessage>) {
        self.lock().messages = Some(messages);
    }

    /// Make one operation fail with a request error
    pub fn fail_on(&self, operation: AssistantOperation) {
        self.lock().failing = Some(operation);
    }

    /// Clear recorded calls and restore default behavior
    pub fn reset(&self) {
        *self.lock() = MockState::default();
    }

    /// All operations invoked so far, in order
    pub fn calls(&self) -> Vec<AssistantOperation> {
        self.lock().calls.clone()
    }

    /// Number of times an operation was invoked
    pub fn call_count(&self, operation: AssistantOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|op| **op == operation)
            .count()
    }

    /// Messages posted to any thread, in order
    pub fn posted_messages(&self) -> Vec<PostedMessage> {
        self.lock().posted.clone()
    }

    /// Provisioning request for an assistant id handed out by this mock
    pub fn assistant_request(&self, assistant_id: &str) -> Option<CreateAssistantRequest> {
        self.lock().assistants.get(assistant_id).cloned()
    }

    /// Record the call, then fail it if it was configured to fail
    fn enter(&self, operation: AssistantOperation) -> Result<MutexGuard<'_, MockState>, AssistantError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| AssistantError::Request(format!("mock state lock poisoned: {e}")))?;
        state.calls.push(operation);
        if state.failing == Some(operation) {
            tracing::debug!(?operation, "Mock assistant: injected failure");
            return Err(AssistantError::Request(format!(
                "mock failure injected for {:?}",
                operation
            )));
        }
        Ok(state)
    }
}

#[async_trait::async_trait]
impl AssistantService for MockAssistantService {
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<String, AssistantError> {
        let mut state = self.enter(AssistantOperation::CreateAssistant)?;
        let id = format!("asst_mock_{}", Uuid::new_v4().simple());
        tracing::debug!(assistant_id = %id, "Mock assistant: provisioned assistant");
        state.assistants.insert(id.clone(), request);
        Ok(id)
    }

    async fn create_thread(&self) -> Result<String, AssistantError> {
        self.enter(AssistantOperation::CreateThread)?;
        Ok(format!("thread_mock_{}", Uuid::new_v4().simple()))
    }

    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError> {
        let mut state = self.enter(AssistantOperation::PostMessage)?;
        state.posted.push(PostedMessage {
            thread_id: thread_id.to_string(),
            role,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn run_and_await(
        &self,
        thread_id: &str,
        _assistant_id: &str,
    ) -> Result<Run, AssistantError> {
        let state = self.enter(AssistantOperation::RunAndAwait)?;
        Ok(Run {
            id: format!("run_mock_{}", Uuid::new_v4().simple()),
            thread_id: thread_id.to_string(),
            status: state.run_status,
        })
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        let state = self.enter(AssistantOperation::ListMessages)?;

        if let Some(messages) = &state.messages {
            return Ok(messages.clone());
        }

        let last_posted = state
            .posted
            .iter()
            .rev()
            .find(|m| m.thread_id == thread_id)
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        Ok(vec![ThreadMessage::assistant_text(
            format!("msg_mock_{}", Uuid::new_v4().simple()),
            format!("Mock reply to: {}", last_posted),
        )])
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
