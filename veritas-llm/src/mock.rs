//! Scripted [`LlmClient`] for tests and offline runs.

use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use veritas_common::{Result, VeritasError};

/// Arguments of the last `generate` call, kept for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

enum Script {
    Reply(String),
    Fail(String),
}

/// Returns the same completion (or the same failure) on every call.
pub struct StaticLlmClient {
    script: Script,
    calls: AtomicUsize,
    last: Mutex<Option<RecordedCall>>,
}

impl StaticLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(text.into()))
    }

    /// Every call fails as if the completion service had errored.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmClient for StaticLlmClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(RecordedCall {
                prompt: prompt.to_string(),
                system_prompt: system_prompt.map(str::to_string),
                max_tokens,
                temperature,
            });
        }

        match &self.script {
            Script::Reply(text) => Ok(LlmResponse {
                text: text.clone(),
                model: Some(self.model_name().to_string()),
                tokens_used: None,
            }),
            Script::Fail(message) => Err(VeritasError::Upstream(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "static-mock"
    }
}
