use crate::domain::{errors::DomainError, WebSearchResults};
use async_trait::async_trait;

#[async_trait]
pub trait WebSearchService: Send + Sync {
    async fn search(&self, query: &str) -> Result<WebSearchResults, DomainError>;
}
