// ABOUTME: Stub LLM provider for recommendation tests without network access
// ABOUTME: Returns a fixed reply or error and records every prompt it receives

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use nutrition_api_server::errors::{AppError, ErrorCode};
use nutrition_api_server::llm::{CompletionRequest, CompletionResponse, LlmProvider};

/// Provider double with a fixed outcome
pub struct StubProvider {
    outcome: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    /// Provider that answers every request with `text`
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_owned()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider that fails every request with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_owned()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `complete` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent request
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        match &self.outcome {
            Ok(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("STOP".to_owned()),
            }),
            Err(message) => Err(AppError::new(
                ErrorCode::ExternalServiceError,
                message.clone(),
            )),
        }
    }
}
