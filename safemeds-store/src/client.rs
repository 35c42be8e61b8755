//! Blocking REST client for the vector store.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};

use safemeds_core::config::StoreConfig;
use safemeds_core::errors::{SafeMedsResult, StoreError};
use safemeds_core::models::{Candidate, RetrievalConstraint};
use safemeds_core::traits::{IVectorStore, PointRecord};

use crate::filter::WireFilter;
use crate::normalize;

/// Client for one collection of the vector store.
pub struct VectorStoreClient {
    http: reqwest::blocking::Client,
    base_url: String,
    collection: String,
}

impl VectorStoreClient {
    pub fn new(config: &StoreConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        }
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, suffix)
    }

    fn check(&self, response: reqwest::blocking::Response) -> SafeMedsResult<Value> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::CollectionMissing {
                name: self.collection.clone(),
            }
            .into());
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::BadResponse {
                reason: format!("{status}: {body}"),
            }
            .into());
        }
        response.json().map_err(|e| {
            StoreError::BadResponse {
                reason: format!("non-JSON response: {e}"),
            }
            .into()
        })
    }

    fn transport(e: reqwest::Error) -> StoreError {
        StoreError::Transport {
            reason: e.to_string(),
        }
    }
}

impl IVectorStore for VectorStoreClient {
    fn recreate_collection(&self, dimensions: usize) -> SafeMedsResult<()> {
        // Dropping a collection that does not exist yet is fine; only the
        // create call is checked.
        let _ = self.http.delete(self.collection_url("")).send();

        let body = json!({
            "vectors": { "size": dimensions, "distance": "Cosine" }
        });
        let response = self
            .http
            .put(self.collection_url(""))
            .json(&body)
            .send()
            .map_err(Self::transport)?;
        self.check(response)?;
        info!(collection = %self.collection, dimensions, "collection recreated");
        Ok(())
    }

    fn upsert(&self, points: &[PointRecord]) -> SafeMedsResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let body = json!({ "points": points });
        let response = self
            .http
            .put(self.collection_url("/points?wait=true"))
            .json(&body)
            .send()
            .map_err(Self::transport)?;
        self.check(response)?;
        debug!(count = points.len(), "points upserted");
        Ok(())
    }

    fn query(
        &self,
        vector: &[f32],
        constraint: Option<&RetrievalConstraint>,
        limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>> {
        let mut body = json!({
            "query": vector,
            "limit": limit,
            "with_payload": true
        });
        if let Some(constraint) = constraint {
            body["filter"] = serde_json::to_value(WireFilter::from(constraint)).map_err(|e| {
                StoreError::BadResponse {
                    reason: format!("filter serialization: {e}"),
                }
            })?;
        }

        let response = self
            .http
            .post(self.collection_url("/points/query"))
            .json(&body)
            .send()
            .map_err(Self::transport)?;
        let raw = self.check(response)?;
        let candidates = normalize::normalize(&raw)?;
        debug!(
            hits = candidates.len(),
            filtered = constraint.is_some(),
            "points query complete"
        );
        Ok(candidates)
    }
}
