//! OpenAI chat-completion answer implementation.

use super::{Responder, SYSTEM_PROMPT};
use crate::error::{ForeleseError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI chat-completion based responder.
pub struct OpenAiResponder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenAiResponder {
    /// Create a new responder for the given model and response size cap.
    pub fn new(model: &str, max_tokens: u32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl Responder for OpenAiResponder {
    #[instrument(skip(self, prompt))]
    async fn answer(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()
                .map_err(|e| ForeleseError::Answer(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| ForeleseError::Answer(e.to_string()))?
                .into(),
        ];

        // Default sampling; only the response size is capped.
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| ForeleseError::Answer(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ForeleseError::OpenAI(format!("Failed to generate answer: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ForeleseError::Answer("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} character answer", answer.len());
        Ok(answer)
    }
}
