//! Fake ports for exercising services and handlers without network access.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::AppState;
use crate::application::{IngestionService, RagService, RecipeAssistant};
use crate::domain::ports::{DocumentLoader, EmbeddingService, LlmService, WebSearchService};
use crate::domain::{DomainError, Embedding, Page, WebDocument, WebSearchResults};
use crate::infrastructure::{AppConfig, InMemoryVectorStore};

const VOCABULARY: &[&str] = &[
    "mercimek", "çorba", "soğan", "ekmek", "un", "hava", "pilav", "tuz",
];

/// Counts vocabulary words, so texts that share words land close together.
#[derive(Default)]
pub struct FakeEmbedding {
    pub calls: AtomicUsize,
    pub fail: bool,
    /// Reported dimension when it should disagree with the vectors produced.
    pub declared_dimension: Option<usize>,
}

impl FakeEmbedding {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            declared_dimension: Some(dimension),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(text: &str) -> Embedding {
        let lower = text.to_lowercase();
        Embedding::new(
            VOCABULARY
                .iter()
                .map(|w| lower.matches(w).count() as f32)
                .collect(),
        )
    }
}

#[async_trait]
impl EmbeddingService for FakeEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::external("embedding backend down"));
        }
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::external("embedding backend down"));
        }
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.declared_dimension.unwrap_or(VOCABULARY.len())
    }
}

/// Replies with queued answers in order and records every prompt it saw.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, DomainError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push_error(&self, err: DomainError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::internal("no scripted reply left")))
    }
}

pub struct FakeWebSearch {
    pub results: WebSearchResults,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
    pub fail: bool,
}

impl FakeWebSearch {
    pub fn with_links(links: &[&str]) -> Self {
        let documents = links
            .iter()
            .map(|l| WebDocument {
                title: Some(format!("title of {l}")),
                content: format!("snippet from {l}"),
                link: Some(l.to_string()),
            })
            .collect();
        Self::new(WebSearchResults {
            documents,
            links: links.iter().map(|l| l.to_string()).collect(),
        })
    }

    pub fn new(results: WebSearchResults) -> Self {
        Self {
            results,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(WebSearchResults::default())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearchService for FakeWebSearch {
    async fn search(&self, query: &str) -> Result<WebSearchResults, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(DomainError::external("search quota exceeded"));
        }
        Ok(self.results.clone())
    }
}

pub struct StaticLoader {
    pub pages: Vec<Page>,
    pub loads: AtomicUsize,
}

impl StaticLoader {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn cookbook() -> Self {
        Self::new(vec![
            Page::new(
                1,
                "Mercimek çorbası: mercimek yıkanır, soğan kavrulur.\n\nTuz ile tatlandırılır.",
            ),
            Page::new(2, "Pilav: pirinç yıkanır, tuz ve su eklenir."),
            Page::new(3, "Ekmek: un, su, maya ve tuz yoğrulur."),
        ])
    }
}

impl DocumentLoader for StaticLoader {
    fn load(&self, path: &Path) -> Result<Vec<Page>, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if path.to_string_lossy().contains("missing") {
            return Err(DomainError::ingestion(format!(
                "cannot read {}",
                path.display()
            )));
        }
        Ok(self.pages.clone())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub embedding: Arc<FakeEmbedding>,
    pub llm: Arc<ScriptedLlm>,
    pub web: Arc<FakeWebSearch>,
}

/// App state over the fake cookbook, already ingested.
pub async fn test_app(llm: ScriptedLlm, web: FakeWebSearch) -> TestApp {
    let embedding = Arc::new(FakeEmbedding::default());
    let store = Arc::new(InMemoryVectorStore::new());
    let rag = Arc::new(RagService::new(embedding.clone(), store.clone(), 2));
    IngestionService::new(Arc::new(StaticLoader::cookbook()), rag.clone(), 1000)
        .ingest(Path::new("turk-mutfagi-kitap.pdf"))
        .await
        .unwrap();

    let llm = Arc::new(llm);
    let web = Arc::new(web);
    let assistant = Arc::new(RecipeAssistant::new(rag, llm.clone(), web.clone()));

    TestApp {
        state: AppState::new(assistant, store, AppConfig::default()),
        embedding,
        llm,
        web,
    }
}
