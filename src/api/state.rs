use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::RecipeAssistant;
use crate::domain::{ports::VectorStore, Conversation};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<RecipeAssistant>,
    /// The single session. Handlers hold the lock for a whole turn, so turns
    /// run one after another.
    pub session: Arc<Mutex<Conversation>>,
    pub store: Arc<dyn VectorStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        assistant: Arc<RecipeAssistant>,
        store: Arc<dyn VectorStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            assistant,
            session: Arc::new(Mutex::new(Conversation::new())),
            store,
            config: Arc::new(config),
        }
    }
}
