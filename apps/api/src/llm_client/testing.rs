//! In-memory provider doubles for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::{CompletionRequest, ImageGenerator, LlmError, TextGenerator};

/// Replays scripted replies in order and records every request it receives.
/// The last reply repeats once the script is exhausted.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    pub fn new(script: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(script.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Holds every reply back for `delay`, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Result<String, String> {
        let mut replies = self.replies.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = replies.pop_front() {
            *last = Some(reply);
        }
        last.clone()
            .unwrap_or_else(|| Err("no scripted reply".to_string()))
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply().map_err(|message| LlmError::Api {
            status: 503,
            message,
        })
    }
}

/// Returns fixed image bytes and counts calls.
pub struct StaticImageGenerator {
    bytes: Bytes,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl StaticImageGenerator {
    pub fn new(bytes: &'static [u8]) -> Self {
        Self {
            bytes: Bytes::from_static(bytes),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<Bytes, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.bytes.clone())
    }
}
