mod assistant;
mod ingestion;
mod rag;

pub use assistant::{AssistantPrompts, RecipeAssistant, DEFAULT_SENTINEL};
pub use ingestion::{IngestionReport, IngestionService};
pub use rag::RagService;
