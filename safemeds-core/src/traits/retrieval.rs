use crate::errors::SafeMedsResult;
use crate::models::{Candidate, RetrievalConstraint};

/// The retriever adapter: encode a query and search the knowledge base
/// under an optional constraint.
///
/// Implementations return a finite candidate sequence in descending score
/// order; one call per pipeline run, not restartable.
pub trait IRetriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
        constraint: Option<&RetrievalConstraint>,
        limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>>;
}
