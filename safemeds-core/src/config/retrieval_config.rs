use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Max candidates returned by one retrieval call.
    pub limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: defaults::RETRIEVAL_LIMIT,
        }
    }
}
