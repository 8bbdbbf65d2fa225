pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;
pub mod vector_store;
pub mod web_search;

pub use config::{AppConfig, Config, ConfigError, Credentials, PromptsConfig};
pub use embedding::GeminiEmbedding;
pub use llm::GeminiLlm;
pub use loader::PdfLoader;
pub use vector_store::InMemoryVectorStore;
pub use web_search::SerperWebSearch;
