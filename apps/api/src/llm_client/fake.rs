//! Scriptable in-process provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{GenerationRequest, GenerationResponse, GenerativeProvider, LlmError};

/// One scripted reply: wait `delay`, then return `outcome`.
pub struct FakeReply {
    pub delay: Duration,
    pub outcome: Result<GenerationResponse, LlmError>,
}

impl FakeReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(GenerationResponse::from_text(text)),
        }
    }

    pub fn failure() -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(LlmError::Api {
                status: 503,
                message: "provider unavailable".to_string(),
            }),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = Box<dyn Fn(&GenerationRequest, usize) -> FakeReply + Send + Sync>;

/// Answers every request through a closure and records what it was asked.
/// The closure also receives the zero-based index of the call.
pub struct FakeProvider {
    respond: Responder,
    calls: Mutex<Vec<GenerationRequest>>,
    counter: AtomicUsize,
}

impl FakeProvider {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&GenerationRequest, usize) -> FakeReply + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn replying_text(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| FakeReply::text(text.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_, _| FakeReply::failure())
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, predicate: impl Fn(&GenerationRequest) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|r| predicate(r)).count()
    }
}

#[async_trait]
impl GenerativeProvider for FakeProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        let reply = (self.respond)(&request, index);
        self.calls.lock().unwrap().push(request);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome
    }
}
