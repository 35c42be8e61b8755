use crate::errors::SafeMedsResult;

/// Embedding generation provider.
///
/// Deterministic for a given model version; the pipeline treats the vector
/// as opaque apart from its dimensionality.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> SafeMedsResult<Vec<f32>>;

    /// Embed a batch of texts (used by the indexing job).
    fn embed_batch(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
