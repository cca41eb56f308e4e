//! Generation service boundary.
//!
//! A single trait seam in front of the external generative-language
//! provider, so the orchestrator can be driven by a scripted generator in
//! tests.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;

use crate::error::ArgueError;

/// Produces one raw response body for one debate request.
///
/// The body is expected to be a JSON array of speaker/text objects, but the
/// caller tolerates anything.
#[async_trait]
pub trait ArgumentGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, opener: &str) -> Result<String, ArgueError>;
}

/// Production generator backed by an OpenAI-compatible chat endpoint.
pub struct OpenAiGenerator {
    model: String,
    api_base: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(
        model: impl Into<String>,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ArgumentGenerator for OpenAiGenerator {
    async fn generate(&self, system_prompt: &str, opener: &str) -> Result<String, ArgueError> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ArgueError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        let config = OpenAIConfig::new()
            .with_api_key(&self.api_key)
            .with_api_base(&self.api_base);

        let client = Client::with_config(config).with_http_client(http_client);

        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: system_prompt.to_string().into(),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: opener.to_string().into(),
                name: None,
            }),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()?;

        // Exactly one invocation per trigger. No retry, no backoff; a
        // failure here is surfaced to the caller as-is.
        let response = client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }
}
