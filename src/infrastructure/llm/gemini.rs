use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;
use std::time::Duration;

use crate::domain::{ports::LlmService, DomainError};

/// Gemini chat model.
pub struct GeminiLlm {
    client: gemini::Client,
    model: String,
    timeout: Duration,
}

impl GeminiLlm {
    pub fn new(client: gemini::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmService for GeminiLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let agent = self.client.agent(&self.model).build();

        let reply = tokio::time::timeout(self.timeout, agent.prompt(prompt))
            .await
            .map_err(|_| DomainError::timeout(format!("{} did not answer in time", self.model)))?
            .map_err(|e| DomainError::external(format!("{} failed: {e}", self.model)))?;

        tracing::debug!(model = %self.model, chars = reply.len(), "llm replied");
        Ok(reply)
    }
}
