use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider: "http" (inference server) or "hashing"
    /// (deterministic local fallback, used in tests and air-gapped runs).
    pub provider: String,
    /// Endpoint of the embedding inference server.
    pub endpoint: String,
    /// Embedding dimensionality. Must match the collection schema.
    pub dimensions: usize,
    /// Max entries in the L1 query-embedding cache.
    pub l1_cache_size: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::EMBEDDING_PROVIDER.to_string(),
            endpoint: defaults::EMBEDDING_ENDPOINT.to_string(),
            dimensions: defaults::EMBEDDING_DIMENSIONS,
            l1_cache_size: defaults::EMBEDDING_L1_CACHE_SIZE,
            timeout_secs: defaults::EMBEDDING_TIMEOUT_SECS,
        }
    }
}
