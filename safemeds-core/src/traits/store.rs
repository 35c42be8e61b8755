use serde::{Deserialize, Serialize};

use crate::errors::SafeMedsResult;
use crate::models::{Candidate, RetrievalConstraint};

/// One point to be written to the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    /// Payload following the collection schema: drug_name, condition,
    /// rx_otc, pregnancy_category, side_effects.
    pub payload: serde_json::Value,
}

/// Vector store collaborator.
pub trait IVectorStore: Send + Sync {
    /// Drop and re-create the collection with the given dimensionality.
    fn recreate_collection(&self, dimensions: usize) -> SafeMedsResult<()>;

    /// Upsert a batch of points.
    fn upsert(&self, points: &[PointRecord]) -> SafeMedsResult<()>;

    /// Nearest-neighbor query under an optional structured constraint.
    ///
    /// Returns up to `limit` candidates ordered by descending score. An
    /// empty result is `Ok(vec![])`, distinct from transport failure.
    fn query(
        &self,
        vector: &[f32],
        constraint: Option<&RetrievalConstraint>,
        limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>>;
}
