//! Provider fallback chain.
//!
//! Providers are tried in priority order; every fallback taken is recorded
//! as a [`DegradationEvent`] so operators can see when the system is
//! running on degraded embeddings.

use safemeds_core::errors::{EmbeddingError, SafeMedsResult};
use safemeds_core::traits::IEmbeddingProvider;
use tracing::warn;

/// One recorded fallback: which provider failed and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradationEvent {
    pub failed_provider: String,
    pub fallback_used: String,
}

/// Ordered provider chain. The first available provider that succeeds wins.
pub struct FallbackChain {
    providers: Vec<Box<dyn IEmbeddingProvider>>,
    events: Vec<DegradationEvent>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Append a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.providers.push(provider);
    }

    /// Embed through the chain. Returns the vector and the name of the
    /// provider that produced it.
    pub fn embed(&mut self, text: &str) -> SafeMedsResult<(Vec<f32>, String)> {
        let mut last_error = None;

        for (i, provider) in self.providers.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text) {
                Ok(vector) => {
                    if i > 0 {
                        let failed = self
                            .providers
                            .first()
                            .map(|p| p.name().to_string())
                            .unwrap_or_default();
                        self.events.push(DegradationEvent {
                            failed_provider: failed,
                            fallback_used: provider.name().to_string(),
                        });
                    }
                    return Ok((vector, provider.name().to_string()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "embedding provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("all {} providers exhausted", self.providers.len()),
            }
            .into()
        }))
    }

    /// Embed a batch through the chain.
    pub fn embed_batch(&mut self, texts: &[String]) -> SafeMedsResult<(Vec<Vec<f32>>, String)> {
        let mut last_error = None;

        for (i, provider) in self.providers.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed_batch(texts) {
                Ok(vectors) => {
                    if i > 0 {
                        let failed = self
                            .providers
                            .first()
                            .map(|p| p.name().to_string())
                            .unwrap_or_default();
                        self.events.push(DegradationEvent {
                            failed_provider: failed,
                            fallback_used: provider.name().to_string(),
                        });
                    }
                    return Ok((vectors, provider.name().to_string()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "batch embed failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("all {} providers exhausted", self.providers.len()),
            }
            .into()
        }))
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;
    impl IEmbeddingProvider for AlwaysFails {
        fn embed(&self, _text: &str) -> SafeMedsResult<Vec<f32>> {
            Err(EmbeddingError::InferenceFailed {
                reason: "down".to_string(),
            }
            .into())
        }
        fn embed_batch(&self, _texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
            Err(EmbeddingError::InferenceFailed {
                reason: "down".to_string(),
            }
            .into())
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "always-fails"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct Constant(&'static str, usize);
    impl IEmbeddingProvider for Constant {
        fn embed(&self, _text: &str) -> SafeMedsResult<Vec<f32>> {
            Ok(vec![1.0; self.1])
        }
        fn embed_batch(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; self.1]).collect())
        }
        fn dimensions(&self) -> usize {
            self.1
        }
        fn name(&self) -> &str {
            self.0
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn primary_success_records_nothing() {
        let mut chain = FallbackChain::new();
        chain.push(Box::new(Constant("primary", 8)));
        chain.push(Box::new(Constant("backup", 8)));
        let (vector, name) = chain.embed("text").unwrap();
        assert_eq!(name, "primary");
        assert_eq!(vector.len(), 8);
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn fallback_is_recorded() {
        let mut chain = FallbackChain::new();
        chain.push(Box::new(AlwaysFails));
        chain.push(Box::new(Constant("backup", 8)));
        let (_, name) = chain.embed("text").unwrap();
        assert_eq!(name, "backup");
        let events = chain.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].failed_provider, "always-fails");
        assert_eq!(events[0].fallback_used, "backup");
    }

    #[test]
    fn exhausted_chain_errors() {
        let mut chain = FallbackChain::new();
        chain.push(Box::new(AlwaysFails));
        assert!(chain.embed("text").is_err());
    }

    #[test]
    fn batch_goes_through_chain() {
        let mut chain = FallbackChain::new();
        chain.push(Box::new(AlwaysFails));
        chain.push(Box::new(Constant("backup", 4)));
        let texts = vec!["a".to_string(), "b".to_string()];
        let (vectors, name) = chain.embed_batch(&texts).unwrap();
        assert_eq!(name, "backup");
        assert_eq!(vectors.len(), 2);
    }
}
