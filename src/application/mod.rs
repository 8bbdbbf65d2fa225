//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! implementations, so the Gemini/Serper adapters can be swapped for fakes.

pub mod prompt;
pub mod services;

pub use prompt::PromptTemplate;
pub use services::{
    AssistantPrompts, IngestionReport, IngestionService, RagService, RecipeAssistant,
    DEFAULT_SENTINEL,
};
