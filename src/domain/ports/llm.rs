use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// A hosted chat model. The prompt is sent as a single user message and the
/// first reply's text comes back.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
