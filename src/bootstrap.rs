use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rig::providers::gemini;
use tracing::info;

use crate::api::AppState;
use crate::application::{IngestionService, RagService, RecipeAssistant};
use crate::infrastructure::{
    AppConfig, Credentials, GeminiEmbedding, GeminiLlm, InMemoryVectorStore, PdfLoader,
    SerperWebSearch,
};

/// Wires the Gemini and Serper adapters together and ingests the cookbook.
///
/// Fails before anything is served when credentials are missing or the PDF
/// cannot be ingested.
pub async fn build_state(config: AppConfig, credentials: Credentials) -> anyhow::Result<AppState> {
    let settings = &config.config;
    let prompts = config.assistant_prompts()?;

    let gemini = gemini_client(&credentials)?;

    let embedding = Arc::new(GeminiEmbedding::from_config(
        gemini.clone(),
        &settings.embedding,
    ));
    let store = Arc::new(InMemoryVectorStore::new());
    let rag = Arc::new(RagService::new(
        embedding,
        store.clone(),
        settings.rag.top_k,
    ));

    let ingestion = IngestionService::new(
        Arc::new(PdfLoader::new()),
        rag.clone(),
        settings.rag.chunk_size,
    );
    let report = ingestion
        .ingest(&settings.rag.pdf_path)
        .await
        .with_context(|| format!("failed to ingest {}", settings.rag.pdf_path.display()))?;
    info!(
        document = %report.document.name,
        pages = report.pages,
        chunks = report.chunks,
        "cookbook ingested"
    );

    let timeout = Duration::from_secs(settings.llm.timeout_seconds);
    let llm = Arc::new(GeminiLlm::new(gemini.clone(), &settings.llm.model).with_timeout(timeout));
    let fallback_llm =
        Arc::new(GeminiLlm::new(gemini, &settings.llm.fallback_model).with_timeout(timeout));
    let web_search = Arc::new(SerperWebSearch::new(
        &settings.web_search,
        credentials.serper_api_key,
    )?);

    let assistant = RecipeAssistant::new(rag, llm, web_search)
        .with_fallback_llm(fallback_llm)
        .with_prompts(prompts);

    Ok(AppState::new(Arc::new(assistant), store, config))
}

/// One Gemini client for embeddings and both chat models, keyed by the
/// credential checked at startup.
fn gemini_client(credentials: &Credentials) -> anyhow::Result<gemini::Client> {
    gemini::Client::new(credentials.gemini_api_key.as_str())
        .context("failed to build the Gemini client")
}
