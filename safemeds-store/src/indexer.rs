//! Offline indexing job: tabular drug dataset → vector store points.
//!
//! One point per dataset row. The embedded text combines name, condition,
//! and side effects; the payload carries the structured fields the
//! retrieval filter and the evaluator read.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use safemeds_core::constants::{INDEX_BATCH_SIZE, MAX_SIDE_EFFECTS_LEN, UNKNOWN_FIELD};
use safemeds_core::errors::{SafeMedsResult, StoreError};
use safemeds_core::traits::{IEmbeddingProvider, IVectorStore, PointRecord};

/// One row of the drug dataset CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct DrugRecord {
    #[serde(default = "unknown")]
    pub drug_name: String,
    #[serde(default = "unknown")]
    pub medical_condition: String,
    #[serde(default = "unknown")]
    pub side_effects: String,
    #[serde(default = "default_rx_otc")]
    pub rx_otc: String,
    #[serde(default = "default_pregnancy_category")]
    pub pregnancy_category: String,
}

fn unknown() -> String {
    UNKNOWN_FIELD.to_string()
}

fn default_rx_otc() -> String {
    "Rx".to_string()
}

fn default_pregnancy_category() -> String {
    "N".to_string()
}

impl DrugRecord {
    /// The text that gets embedded for this record.
    pub fn semantic_text(&self) -> String {
        format!(
            "Drug Name: {}. Condition: {}. Side Effects: {}.",
            self.drug_name, self.medical_condition, self.side_effects
        )
    }

    /// The structured payload stored with the point.
    pub fn payload(&self) -> serde_json::Value {
        let mut side_effects = self.side_effects.clone();
        if side_effects.len() > MAX_SIDE_EFFECTS_LEN {
            let mut cut = MAX_SIDE_EFFECTS_LEN;
            while !side_effects.is_char_boundary(cut) {
                cut -= 1;
            }
            side_effects.truncate(cut);
        }
        serde_json::json!({
            "drug_name": self.drug_name,
            "condition": self.medical_condition,
            "rx_otc": self.rx_otc,
            "pregnancy_category": self.pregnancy_category,
            "side_effects": side_effects,
        })
    }
}

/// Summary of one indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub indexed: usize,
    pub batches: usize,
}

/// The indexing job.
pub struct Indexer<'a> {
    embedder: &'a dyn IEmbeddingProvider,
    store: &'a dyn IVectorStore,
}

impl<'a> Indexer<'a> {
    pub fn new(embedder: &'a dyn IEmbeddingProvider, store: &'a dyn IVectorStore) -> Self {
        Self { embedder, store }
    }

    /// Recreate the collection and index the dataset at `path`.
    ///
    /// `limit` caps the number of rows (handy for smoke runs). Rows are
    /// embedded and upserted in batches of [`INDEX_BATCH_SIZE`].
    pub fn index_csv(&self, path: &Path, limit: Option<usize>) -> SafeMedsResult<IndexReport> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::Dataset {
            reason: format!("{}: {e}", path.display()),
        })?;

        self.store.recreate_collection(self.embedder.dimensions())?;

        let mut batch: Vec<DrugRecord> = Vec::with_capacity(INDEX_BATCH_SIZE);
        let mut next_id: u64 = 0;
        let mut indexed = 0usize;
        let mut batches = 0usize;

        for row in reader.deserialize::<DrugRecord>() {
            if let Some(limit) = limit {
                if indexed + batch.len() >= limit {
                    break;
                }
            }
            let record = row.map_err(|e| StoreError::Dataset {
                reason: e.to_string(),
            })?;
            batch.push(record);

            if batch.len() >= INDEX_BATCH_SIZE {
                indexed += self.flush(&mut batch, &mut next_id)?;
                batches += 1;
            }
        }

        if !batch.is_empty() {
            indexed += self.flush(&mut batch, &mut next_id)?;
            batches += 1;
        }

        info!(indexed, batches, "knowledge base indexed");
        Ok(IndexReport { indexed, batches })
    }

    fn flush(&self, batch: &mut Vec<DrugRecord>, next_id: &mut u64) -> SafeMedsResult<usize> {
        let texts: Vec<String> = batch.iter().map(DrugRecord::semantic_text).collect();
        let vectors = self.embedder.embed_batch(&texts)?;

        let points: Vec<PointRecord> = batch
            .iter()
            .zip(vectors)
            .map(|(record, vector)| {
                let point = PointRecord {
                    id: *next_id,
                    vector,
                    payload: record.payload(),
                };
                *next_id += 1;
                point
            })
            .collect();

        self.store.upsert(&points)?;
        debug!(count = points.len(), "batch flushed");

        let flushed = batch.len();
        batch.clear();
        Ok(flushed)
    }
}
