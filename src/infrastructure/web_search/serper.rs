use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{ports::WebSearchService, DomainError, WebDocument, WebSearchResults};
use crate::infrastructure::config::WebSearchConfig;

/// Google results through the serper.dev API.
pub struct SerperWebSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    num_results: usize,
}

impl SerperWebSearch {
    pub fn new(config: &WebSearchConfig, api_key: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
            num_results: config.num_results,
        })
    }
}

#[async_trait]
impl WebSearchService for SerperWebSearch {
    async fn search(&self, query: &str) -> Result<WebSearchResults, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query, "num": self.num_results }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::timeout("web search timed out")
                } else {
                    DomainError::external(format!("web search request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(format!(
                "web search returned {status}: {body}"
            )));
        }

        let body: SerperResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("invalid web search response: {e}")))?;

        let results = body.into_results(self.num_results);
        tracing::debug!(
            documents = results.documents.len(),
            links = results.links.len(),
            "serper search complete"
        );
        Ok(results)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerperResponse {
    answer_box: Option<AnswerBox>,
    knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    organic: Vec<OrganicResult>,
    #[serde(default)]
    people_also_ask: Vec<RelatedQuestion>,
}

#[derive(Debug, Deserialize)]
struct AnswerBox {
    title: Option<String>,
    answer: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeGraph {
    title: Option<String>,
    description: Option<String>,
    description_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct RelatedQuestion {
    question: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

impl SerperResponse {
    /// Answer box first, then the knowledge graph, organic results and
    /// related questions. Only organic results contribute links. Both lists
    /// are capped at `limit`.
    fn into_results(self, limit: usize) -> WebSearchResults {
        let mut documents = Vec::new();

        if let Some(answer_box) = self.answer_box {
            if let Some(content) = answer_box.snippet.or(answer_box.answer) {
                documents.push(WebDocument {
                    title: answer_box.title,
                    content,
                    link: answer_box.link,
                });
            }
        }

        if let Some(graph) = self.knowledge_graph {
            if let Some(content) = graph.description {
                documents.push(WebDocument {
                    title: graph.title,
                    content,
                    link: graph.description_link,
                });
            }
        }

        let mut links: Vec<String> = self.organic.iter().map(|r| r.link.clone()).collect();

        documents.extend(self.organic.into_iter().map(|r| WebDocument {
            title: r.title,
            content: r.snippet,
            link: Some(r.link),
        }));

        documents.extend(self.people_also_ask.into_iter().filter_map(|q| {
            let content = q.snippet.or_else(|| q.title.clone())?;
            Some(WebDocument {
                title: q.question.or(q.title),
                content,
                link: q.link,
            })
        }));

        documents.truncate(limit);
        links.truncate(limit);

        WebSearchResults { documents, links }
    }
}
