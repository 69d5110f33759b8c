use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::ModelClient;
use crate::error::AIError;

/// One scripted outcome for the mock client.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    /// Surfaced as `AIError::Mock`
    Failure(String),
}

/// Shared handle for scripting a `MockClient` and observing its call count.
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: AtomicUsize,
}

impl MockHandle {
    /// Queue one more scripted response.
    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Number of `invoke` calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Option<MockResponse> {
        self.responses.lock().unwrap().pop_front()
    }
}

/// Scripted client for tests: replays queued responses in order, failing once
/// the queue runs dry so retry bounds stay observable.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        for response in responses {
            handle.add_response(response);
        }
        (client, handle)
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn invoke(&self, _prompt: String) -> Result<String, AIError> {
        self.handle.calls.fetch_add(1, Ordering::SeqCst);
        match self.handle.next_response() {
            Some(MockResponse::Success(text)) => Ok(text),
            Some(MockResponse::Failure(message)) => Err(AIError::Mock(message)),
            None => Err(AIError::Mock("mock response queue is empty".to_string())),
        }
    }

    fn clone_box(&self) -> Box<dyn ModelClient> {
        Box::new(self.clone())
    }
}

/// Mock client for testing that returns empty responses
#[derive(Debug, Clone, Default)]
pub struct MockVoid;

#[async_trait]
impl ModelClient for MockVoid {
    async fn invoke(&self, _prompt: String) -> Result<String, AIError> {
        Ok("{}".to_string())
    }

    fn clone_box(&self) -> Box<dyn ModelClient> {
        Box::new(self.clone())
    }
}
