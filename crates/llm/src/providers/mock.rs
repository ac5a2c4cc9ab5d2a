//! Scripted generation client for tests.

use crate::client::{GenerationClient, GenerationRequest};
use docsift_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock client for testing and development.
///
/// Replies are handed out in the order they were queued: each `with_reply`
/// entry answers one call, each `with_failure` entry makes one call fail
/// with a service error. Calls beyond the script fail. Every request is
/// recorded and can be inspected afterwards.
#[derive(Debug, Default)]
pub struct MockGenerationClient {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerationClient {
    /// Create a mock client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queue a service failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Requests seen so far, in call order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl GenerationClient for MockGenerationClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        self.calls.lock().unwrap().push(request.clone());

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(AppError::Service(message)),
            None => Err(AppError::Service("Mock script exhausted".to_string())),
        }
    }
}
