use std::sync::Arc;
use tracing::instrument;

use crate::application::prompt::{
    PromptTemplate, DEFAULT_RAG_TEMPLATE, DEFAULT_WEB_SEARCH_TEMPLATE,
};
use crate::application::RagService;
use crate::domain::{
    ports::{LlmService, WebSearchService},
    Answer, Conversation, DomainError, Route,
};

pub const DEFAULT_SENTINEL: &str = "cevap_yok";

/// Prompts for both paths plus the sentinel the RAG prompt asks for.
#[derive(Debug, Clone)]
pub struct AssistantPrompts {
    pub rag: PromptTemplate,
    pub web_search: PromptTemplate,
    pub sentinel: String,
}

impl AssistantPrompts {
    pub fn new(rag: &str, web_search: &str, sentinel: &str) -> Result<Self, DomainError> {
        if sentinel.trim().is_empty() {
            return Err(DomainError::validation("sentinel must not be empty"));
        }
        Ok(Self {
            rag: PromptTemplate::with_sentinel(rag, sentinel)?,
            web_search: PromptTemplate::new(web_search)?,
            sentinel: sentinel.to_string(),
        })
    }
}

impl Default for AssistantPrompts {
    fn default() -> Self {
        Self::new(DEFAULT_RAG_TEMPLATE, DEFAULT_WEB_SEARCH_TEMPLATE, DEFAULT_SENTINEL)
            .expect("built-in prompt templates are valid")
    }
}

/// Answers cookbook questions, falling back to the web when the cookbook
/// passages do not contain the answer.
pub struct RecipeAssistant {
    rag: Arc<RagService>,
    llm: Arc<dyn LlmService>,
    fallback_llm: Arc<dyn LlmService>,
    web_search: Arc<dyn WebSearchService>,
    prompts: AssistantPrompts,
}

impl RecipeAssistant {
    pub fn new(
        rag: Arc<RagService>,
        llm: Arc<dyn LlmService>,
        web_search: Arc<dyn WebSearchService>,
    ) -> Self {
        Self {
            rag,
            fallback_llm: llm.clone(),
            llm,
            web_search,
            prompts: AssistantPrompts::default(),
        }
    }

    pub fn with_fallback_llm(mut self, llm: Arc<dyn LlmService>) -> Self {
        self.fallback_llm = llm;
        self
    }

    pub fn with_prompts(mut self, prompts: AssistantPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Answers `query` and records the turn in `conversation`.
    ///
    /// A blank query returns `Ok(None)` without calling any service. On
    /// error nothing is recorded.
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    pub async fn answer(
        &self,
        conversation: &mut Conversation,
        query: &str,
    ) -> Result<Option<Answer>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("blank query ignored");
            return Ok(None);
        }

        let answer = self.run(query).await?;
        conversation.record_turn(query, &answer);
        Ok(Some(answer))
    }

    /// One retrieval + generation pass. Earlier turns are not part of the prompt.
    #[instrument(skip(self))]
    pub async fn run(&self, query: &str) -> Result<Answer, DomainError> {
        let results = self.rag.retrieve(query).await?;
        let documents: Vec<&str> = results.iter().map(|r| r.chunk.content.as_str()).collect();

        let prompt = self.prompts.rag.render(&documents, query);
        let reply = self.llm.complete(&prompt).await?;

        let route = Route::decide(&reply, &self.prompts.sentinel);
        tracing::info!(?route, documents = documents.len(), "routing primary reply");

        match route {
            Route::Direct => Ok(Answer::direct(reply)),
            Route::WebSearch => self.answer_from_web(query).await,
        }
    }

    #[instrument(skip(self))]
    async fn answer_from_web(&self, query: &str) -> Result<Answer, DomainError> {
        let results = self.web_search.search(query).await?;
        tracing::debug!(
            documents = results.documents.len(),
            links = results.links.len(),
            "web search returned"
        );

        let documents: Vec<&str> = results.documents.iter().map(|d| d.content.as_str()).collect();
        let prompt = self.prompts.web_search.render(&documents, query);
        let reply = self.fallback_llm.complete(&prompt).await?;

        Ok(Answer::from_web(reply, results.links))
    }
}
