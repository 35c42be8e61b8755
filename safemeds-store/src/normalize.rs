//! Hit-shape normalization.
//!
//! Depending on API version the store answers a points query with either a
//! bare hit array (`"result": [...]`) or a wrapper object exposing a points
//! field (`"result": {"points": [...]}`). Both shapes collapse here, once,
//! into a uniform `Candidate` sequence; nothing downstream ever inspects
//! response shapes.

use serde_json::Value;

use safemeds_core::constants::UNKNOWN_FIELD;
use safemeds_core::errors::{SafeMedsResult, StoreError};
use safemeds_core::models::{Candidate, PregnancyCategory};

/// Normalize a raw query response body into candidates, ordered by
/// descending score.
pub fn normalize(body: &Value) -> SafeMedsResult<Vec<Candidate>> {
    let hits = match &body["result"] {
        Value::Array(hits) => hits.as_slice(),
        Value::Object(wrapper) => match wrapper.get("points") {
            Some(Value::Array(hits)) => hits.as_slice(),
            _ => {
                return Err(StoreError::BadResponse {
                    reason: "result object has no points array".to_string(),
                }
                .into())
            }
        },
        Value::Null => {
            return Err(StoreError::BadResponse {
                reason: "response has no result field".to_string(),
            }
            .into())
        }
        other => {
            return Err(StoreError::BadResponse {
                reason: format!("unexpected result shape: {other}"),
            }
            .into())
        }
    };

    let mut candidates: Vec<Candidate> = hits.iter().map(candidate_from_hit).collect();
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    Ok(candidates)
}

fn candidate_from_hit(hit: &Value) -> Candidate {
    let payload = &hit["payload"];
    Candidate {
        drug_name: payload_str(payload, "drug_name"),
        condition: payload_str(payload, "condition"),
        pregnancy_category: PregnancyCategory::parse(&payload_str(payload, "pregnancy_category")),
        rx_otc: payload_str(payload, "rx_otc"),
        side_effects: payload_str(payload, "side_effects"),
        score: hit["score"].as_f64().unwrap_or(0.0) as f32,
    }
}

fn payload_str(payload: &Value, key: &str) -> String {
    payload[key]
        .as_str()
        .unwrap_or(UNKNOWN_FIELD)
        .to_string()
}
