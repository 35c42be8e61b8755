//! Embedding providers.

mod hashing_fallback;
mod http_provider;

pub use hashing_fallback::HashingFallback;
pub use http_provider::HttpEmbeddingProvider;

use safemeds_core::config::EmbeddingConfig;
use safemeds_core::traits::IEmbeddingProvider;

/// Construct the primary provider named by the config.
///
/// Unknown provider names fall back to the hashing provider so a typo in
/// config degrades instead of failing startup.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "http" => Box::new(HttpEmbeddingProvider::new(
            config.endpoint.clone(),
            config.dimensions,
            config.timeout_secs,
        )),
        "hashing" => Box::new(HashingFallback::new(config.dimensions)),
        other => {
            tracing::warn!(provider = other, "unknown embedding provider, using hashing");
            Box::new(HashingFallback::new(config.dimensions))
        }
    }
}
