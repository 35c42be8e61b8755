//! Retrieval constraint → wire filter translation.
//!
//! The store expects `{"must": [{"key": ..., "match": {"value": ...}}]}`
//! with `{"any": [...]}` for membership conditions.

use serde::Serialize;

use safemeds_core::models::{MatchPredicate, RetrievalConstraint};

#[derive(Debug, Serialize)]
pub struct WireFilter {
    must: Vec<WireCondition>,
}

#[derive(Debug, Serialize)]
struct WireCondition {
    key: String,
    #[serde(rename = "match")]
    matcher: WireMatch,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireMatch {
    Value { value: String },
    Any { any: Vec<String> },
}

impl From<&RetrievalConstraint> for WireFilter {
    fn from(constraint: &RetrievalConstraint) -> Self {
        let must = constraint
            .must
            .iter()
            .map(|condition| WireCondition {
                key: condition.key.clone(),
                matcher: match &condition.predicate {
                    MatchPredicate::Value(value) => WireMatch::Value {
                        value: value.clone(),
                    },
                    MatchPredicate::Any(values) => WireMatch::Any {
                        any: values.clone(),
                    },
                },
            })
            .collect();
        Self { must }
    }
}
