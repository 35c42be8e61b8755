//! The retriever adapter consumed by the pipeline.

use safemeds_core::errors::SafeMedsResult;
use safemeds_core::models::{Candidate, RetrievalConstraint};
use safemeds_core::traits::{IEmbeddingProvider, IRetriever, IVectorStore};
use tracing::{debug, info};

/// Encodes the query and runs the nearest-neighbor search under the
/// caller's constraint. One borrowed embedder, one borrowed store; the
/// adapter itself holds no state.
pub struct RetrieverAdapter<'a> {
    embedder: &'a dyn IEmbeddingProvider,
    store: &'a dyn IVectorStore,
}

impl<'a> RetrieverAdapter<'a> {
    pub fn new(embedder: &'a dyn IEmbeddingProvider, store: &'a dyn IVectorStore) -> Self {
        Self { embedder, store }
    }
}

impl IRetriever for RetrieverAdapter<'_> {
    fn retrieve(
        &self,
        query: &str,
        constraint: Option<&RetrievalConstraint>,
        limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>> {
        let vector = self.embedder.embed(query)?;
        debug!(dims = vector.len(), "query encoded");

        let candidates = self.store.query(&vector, constraint, limit)?;
        info!(
            hits = candidates.len(),
            limit,
            filtered = constraint.is_some(),
            "retrieval complete"
        );
        Ok(candidates)
    }
}
