use crate::traits::{LlmClient, LlmResponse};
use crate::OPENAI_API_KEY_ENV;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use veritas_common::{Result, VeritasError};
use veritas_http::{HttpClient, HttpError};

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

pub struct OpenAiClient {
    client: HttpClient,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
pub struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// One element in the `choices` array
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    pub total_tokens: u32,
}

impl OpenAiClient {
    /// Create a client for an OpenAI-compatible endpoint.
    ///
    /// The credential is injected here once; a missing key is only reported
    /// when a completion is requested, so the server can still start and
    /// answer pre-flight requests.
    pub fn new(api_key: Option<String>, model: String, endpoint: &str) -> Result<Self> {
        let client = HttpClient::new(endpoint)
            .map_err(|e| VeritasError::Config(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VeritasError::MissingCredential(OPENAI_API_KEY_ENV))?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let req = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        tracing::debug!(model = %self.model, ?max_tokens, ?temperature, "openai.chat.request");

        let resp: ChatCompletionResponse = self
            .client
            .post_json(CHAT_COMPLETIONS_PATH, Some(api_key), &req)
            .await
            .map_err(http_to_veritas)?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VeritasError::Upstream("completion contained no choices".into()))?;

        Ok(LlmResponse {
            text: choice.message.content.unwrap_or_default(),
            model: resp.model,
            tokens_used: resp.usage.map(|u| u.total_tokens),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn http_to_veritas(e: HttpError) -> VeritasError {
    match e.status() {
        Some(status) => VeritasError::Upstream(format!("OpenAI API error: {}", status.as_u16())),
        None => VeritasError::Upstream(format!("{e}")),
    }
}
