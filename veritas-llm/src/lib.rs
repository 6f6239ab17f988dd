//! Completion-service integration for Veritas.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, the
//! OpenAI-compatible chat-completions adapter in [`openai`], and a scripted
//! [`mock::StaticLlmClient`] for tests.
//!
//! # Examples
//! ```no_run
//! use veritas_common::Result;
//! use veritas_llm::openai::OpenAiClient;
//! use veritas_llm::traits::LlmClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let client = OpenAiClient::new(
//!     std::env::var("OPENAI_API_KEY").ok(),
//!     veritas_llm::DEFAULT_OPENAI_MODEL.to_string(),
//!     veritas_llm::DEFAULT_OPENAI_ENDPOINT,
//! )?;
//! let reply = client.generate("Say OK", None, Some(5), Some(0.1)).await?;
//! assert!(!reply.text.is_empty());
//! # Ok(())
//! # }
//! ```
pub mod mock;
pub mod openai;
pub mod traits;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
/// Environment variable holding the completion-service credential.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
