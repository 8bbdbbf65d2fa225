use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::prompt::{DEFAULT_RAG_TEMPLATE, DEFAULT_WEB_SEARCH_TEMPLATE};
use crate::application::{AssistantPrompts, DEFAULT_SENTINEL};

pub const CONFIG_PATH_ENV: &str = "APP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("{0} must be set")]
    MissingCredential(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub rag: RagConfig,
    pub web_search: WebSearchConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    /// Model used for the web-search answer.
    pub fallback_model: String,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            fallback_model: "gemini-2.0-flash".to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-004".to_string(),
            dimension: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub pdf_path: PathBuf,
    pub top_k: usize,
    pub chunk_size: usize,
    pub sentinel: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from("turk-mutfagi-kitap.pdf"),
            top_k: 10,
            chunk_size: 1000,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    pub endpoint: String,
    pub num_results: usize,
    pub timeout_seconds: u64,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev/search".to_string(),
            num_results: 10,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub rag: String,
    pub web_search: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            rag: DEFAULT_RAG_TEMPLATE.to_string(),
            web_search: DEFAULT_WEB_SEARCH_TEMPLATE.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the file named by `APP_CONFIG` (or `config.yaml`), then applies
    /// environment overrides and validates the result.
    ///
    /// A missing `config.yaml` falls back to built-in defaults; a missing
    /// file named explicitly through `APP_CONFIG` is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

        let mut config = if explicit.is_some() || path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.config.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.config.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "SERVER_PORT",
                value: port,
            })?;
        }
        if let Some(path) = lookup("PDF_PATH") {
            self.config.rag.pdf_path = PathBuf::from(path);
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.config.llm.model = model;
        }
        if let Some(top_k) = lookup("RAG_TOP_K") {
            self.config.rag.top_k = top_k.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "RAG_TOP_K",
                value: top_k,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config.rag.top_k == 0 {
            return Err(ConfigError::Invalid("rag.top_k must be at least 1".into()));
        }
        if self.config.rag.chunk_size == 0 {
            return Err(ConfigError::Invalid("rag.chunk_size must be at least 1".into()));
        }
        self.assistant_prompts()?;
        Ok(())
    }

    pub fn assistant_prompts(&self) -> Result<AssistantPrompts, ConfigError> {
        AssistantPrompts::new(
            &self.prompts.rag,
            &self.prompts.web_search,
            &self.config.rag.sentinel,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// API keys for the hosted services. Both are required before serving.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub serper_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingCredential(key))
        };

        Ok(Self {
            gemini_api_key: require(GEMINI_API_KEY_ENV)?,
            serper_api_key: require(SERPER_API_KEY_ENV)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("serper_api_key", &"<redacted>")
            .finish()
    }
}
