mod document_loader;
mod embedding;
mod llm;
mod vector_store;
mod web_search;

pub use document_loader::DocumentLoader;
pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use vector_store::VectorStore;
pub use web_search::WebSearchService;
