use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Vector store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the vector store REST API.
    pub url: String,
    /// Collection holding the drug knowledge base.
    pub collection: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: defaults::STORE_URL.to_string(),
            collection: constants::COLLECTION_NAME.to_string(),
            timeout_secs: defaults::STORE_TIMEOUT_SECS,
        }
    }
}
