//! EmbeddingEngine: the crate's entry point.
//!
//! Wires the configured primary provider, the hashing fallback, and the L1
//! cache into one interface the retriever and the indexer share.

use safemeds_core::config::EmbeddingConfig;
use safemeds_core::errors::{EmbeddingError, SafeMedsResult};
use safemeds_core::traits::IEmbeddingProvider;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::fallback::{DegradationEvent, FallbackChain};
use crate::providers;

/// The main embedding engine.
///
/// Implements [`IEmbeddingProvider`] so callers can treat it as one
/// provider; internally every call runs through the cache and the fallback
/// chain. The chain mutates (degradation events), so it sits behind a
/// mutex; contention is irrelevant at one pipeline run per session.
pub struct EmbeddingEngine {
    chain: Mutex<FallbackChain>,
    cache: EmbeddingCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut chain = FallbackChain::new();
        chain.push(providers::create_provider(&config));
        // The hashing provider is always the last resort. If the primary
        // already is the hashing provider, the duplicate is harmless; the
        // first available one wins.
        chain.push(Box::new(providers::HashingFallback::new(config.dimensions)));

        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "embedding engine initialized"
        );

        Self {
            chain: Mutex::new(chain),
            cache: EmbeddingCache::new(config.l1_cache_size),
            config,
        }
    }

    fn embed_cached(&self, text: &str) -> SafeMedsResult<Vec<f32>> {
        let key = EmbeddingCache::key_for(text);
        if let Some(vector) = self.cache.get(&key) {
            debug!(%key, "embedding cache hit");
            return Ok(vector);
        }

        let (vector, provider) = self
            .chain
            .lock()
            .map_err(|_| EmbeddingError::ProviderUnavailable {
                provider: "embedding chain poisoned".to_string(),
            })?
            .embed(text)?;
        debug!(provider = %provider, "embedded text");

        if vector.len() != self.config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: vector.len(),
            }
            .into());
        }

        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    /// Drain degradation events accumulated since the last call.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain
            .lock()
            .map(|mut chain| chain.drain_events())
            .unwrap_or_default()
    }

    /// Name of the currently active provider.
    pub fn active_provider(&self) -> String {
        self.chain
            .lock()
            .map(|chain| chain.active_provider_name().to_string())
            .unwrap_or_else(|_| "none".to_string())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> SafeMedsResult<Vec<f32>> {
        self.embed_cached(text)
    }

    fn embed_batch(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
        // Indexing batches are unlikely to repeat; bypass the cache and go
        // straight through the chain.
        let (vectors, provider) = self
            .chain
            .lock()
            .map_err(|_| EmbeddingError::ProviderUnavailable {
                provider: "embedding chain poisoned".to_string(),
            })?
            .embed_batch(texts)?;
        debug!(provider = %provider, count = vectors.len(), "embedded batch");
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "safemeds-embedding-engine"
    }

    fn is_available(&self) -> bool {
        // The hashing fallback is always present.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashing_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "hashing".to_string(),
            dimensions: 64,
            ..Default::default()
        })
    }

    #[test]
    fn embeds_at_configured_dimensions() {
        let engine = hashing_engine();
        assert_eq!(engine.embed("migraine").unwrap().len(), 64);
    }

    #[test]
    fn repeated_query_is_cached_and_stable() {
        let engine = hashing_engine();
        let a = engine.embed("persistent dry cough").unwrap();
        let b = engine.embed("persistent dry cough").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn batch_matches_single_embedding() {
        let engine = hashing_engine();
        let single = engine.embed("fever and chills").unwrap();
        let batch = engine
            .embed_batch(&["fever and chills".to_string()])
            .unwrap();
        assert_eq!(batch[0], single);
    }

    #[test]
    fn no_degradation_on_healthy_chain() {
        let engine = hashing_engine();
        engine.embed("rash").unwrap();
        assert!(engine.drain_degradation_events().is_empty());
    }
}
