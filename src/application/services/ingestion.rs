use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::instrument;

use crate::application::RagService;
use crate::domain::{
    ports::DocumentLoader, split_paragraphs, ChunkMetadata, Document, DocumentChunk, DomainError,
};

#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub document: Document,
    pub pages: usize,
    pub chunks: usize,
}

/// Loads a source file, chunks it page by page and indexes the chunks.
///
/// Each source is ingested at most once per service; asking again returns
/// the earlier report and leaves the store alone.
pub struct IngestionService {
    loader: Arc<dyn DocumentLoader>,
    rag: Arc<RagService>,
    chunk_size: usize,
    ingested: Mutex<HashMap<PathBuf, IngestionReport>>,
}

impl IngestionService {
    pub fn new(loader: Arc<dyn DocumentLoader>, rag: Arc<RagService>, chunk_size: usize) -> Self {
        Self {
            loader,
            rag,
            chunk_size,
            ingested: Mutex::new(HashMap::new()),
        }
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest(&self, path: &Path) -> Result<IngestionReport, DomainError> {
        if let Some(report) = self.previous(path)? {
            tracing::warn!("source already ingested, skipping");
            return Ok(report);
        }

        let pages = self.loader.load(path)?;
        let source = path.display().to_string();
        let document = Document::new(&source).with_metadata(serde_json::json!({
            "source": source,
            "pages": pages.len(),
        }));

        let mut chunks = Vec::new();
        for page in &pages {
            for content in split_paragraphs(&page.text, self.chunk_size) {
                let chunk = DocumentChunk::new(document.id, content, chunks.len()).with_metadata(
                    ChunkMetadata {
                        page: Some(page.number),
                        source: Some(source.clone()),
                    },
                );
                chunks.push(chunk);
            }
        }

        if chunks.is_empty() {
            return Err(DomainError::ingestion(format!(
                "no text could be extracted from {source}"
            )));
        }

        self.rag.index_chunks(&chunks).await?;

        let report = IngestionReport {
            document,
            pages: pages.len(),
            chunks: chunks.len(),
        };
        tracing::info!(pages = report.pages, chunks = report.chunks, "ingestion complete");

        self.ingested
            .lock()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .insert(path.to_path_buf(), report.clone());

        Ok(report)
    }

    fn previous(&self, path: &Path) -> Result<Option<IngestionReport>, DomainError> {
        let ingested = self
            .ingested
            .lock()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(ingested.get(path).cloned())
    }
}
