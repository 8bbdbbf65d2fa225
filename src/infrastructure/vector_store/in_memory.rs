use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{ports::VectorStore, DocumentChunk, DomainError, Embedding, SearchResult};

/// Brute-force cosine search over chunks held in memory.
///
/// Results are ordered by score, highest first; equal scores keep insertion
/// order.
pub struct InMemoryVectorStore {
    chunks: RwLock<Vec<(DocumentChunk, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        chunk: &DocumentChunk,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        match store.iter_mut().find(|(c, _)| c.id == chunk.id) {
            Some(slot) => *slot = (chunk.clone(), embedding.clone()),
            None => store.push((chunk.clone(), embedding.clone())),
        }
        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let store = self
            .chunks
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<SearchResult> = store
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        Ok(results)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        let store = self
            .chunks
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(store.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_upsert_and_search() {
        let store = InMemoryVectorStore::new();
        let doc_id = Uuid::new_v4();

        let chunk = DocumentChunk::new(doc_id, "test content", 0);
        let embedding = Embedding::new(vec![1.0, 0.0, 0.0]);

        store.upsert(&chunk, &embedding).await.unwrap();

        let query = Embedding::new(vec![1.0, 0.0, 0.0]);
        let results = store.search(&query, 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!((results[0].score - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() {
        let store = InMemoryVectorStore::new();
        let doc_id = Uuid::new_v4();

        store
            .upsert(&DocumentChunk::new(doc_id, "old", 0), &Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert(&DocumentChunk::new(doc_id, "new", 0), &Embedding::new(vec![0.0, 1.0]))
            .await
            .unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        let results = store.search(&Embedding::new(vec![0.0, 1.0]), 5).await.unwrap();
        assert_eq!(results[0].chunk.content, "new");
    }

    #[tokio::test]
    async fn test_search_orders_by_score_and_limits() {
        let store = InMemoryVectorStore::new();
        let doc_id = Uuid::new_v4();
        let vectors = [vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        for (i, v) in vectors.into_iter().enumerate() {
            store
                .upsert(&DocumentChunk::new(doc_id, format!("c{i}"), i), &Embedding::new(v))
                .await
                .unwrap();
        }

        let results = store.search(&Embedding::new(vec![1.0, 0.0]), 2).await.unwrap();
        let contents: Vec<_> = results.iter().map(|r| r.chunk.content.as_str()).collect();
        assert_eq!(contents, vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let store = InMemoryVectorStore::new();
        let results = store.search(&Embedding::new(vec![1.0]), 10).await.unwrap();
        assert!(results.is_empty());
    }
}
