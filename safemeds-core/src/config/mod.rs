//! Configuration for every subsystem.
//!
//! Each subsystem has its own serde-deserializable section with full
//! defaults, so a missing or partial TOML file always yields a working
//! configuration. The inference API credential is deliberately NOT part of
//! this tree: it is read from the process environment at client
//! construction.

mod embedding_config;
mod inference_config;
mod retrieval_config;
mod store_config;

pub use embedding_config::EmbeddingConfig;
pub use inference_config::InferenceConfig;
pub use retrieval_config::RetrievalConfig;
pub use store_config::StoreConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{SafeMedsError, SafeMedsResult};

/// Default values shared by the config sections.
pub mod defaults {
    use crate::constants;

    pub const EMBEDDING_PROVIDER: &str = "http";
    pub const EMBEDDING_ENDPOINT: &str = "http://localhost:8080/embed";
    pub const EMBEDDING_DIMENSIONS: usize = constants::EMBEDDING_DIMENSIONS;
    pub const EMBEDDING_L1_CACHE_SIZE: u64 = 1024;
    pub const EMBEDDING_TIMEOUT_SECS: u64 = 30;

    pub const STORE_URL: &str = "http://localhost:6333";
    pub const STORE_TIMEOUT_SECS: u64 = 30;

    pub const INFERENCE_BASE_URL: &str = "https://api.groq.com/openai/v1";
    pub const INFERENCE_CHAT_MODEL: &str = "llama-3.1-8b-instant";
    pub const INFERENCE_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";
    pub const INFERENCE_API_KEY_ENV: &str = "GROQ_API_KEY";
    pub const INFERENCE_TIMEOUT_SECS: u64 = 60;

    pub const RETRIEVAL_LIMIT: usize = constants::DEFAULT_RETRIEVAL_LIMIT;
}

/// Top-level configuration tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeMedsConfig {
    pub embedding: EmbeddingConfig,
    pub store: StoreConfig,
    pub inference: InferenceConfig,
    pub retrieval: RetrievalConfig,
}

impl SafeMedsConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml_str(raw: &str) -> SafeMedsResult<Self> {
        toml::from_str(raw).map_err(|e| SafeMedsError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> SafeMedsResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| SafeMedsError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
