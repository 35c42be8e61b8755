use serde::{Deserialize, Serialize};

/// Structured retrieval filter derived from a [`SafetyProfile`] at query
/// time. A conjunction of field predicates; an empty conjunction never
/// exists, the builder returns `None` instead. Has no identity beyond a
/// single retrieval call.
///
/// [`SafetyProfile`]: crate::models::SafetyProfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConstraint {
    /// Every condition must hold on the candidate's payload.
    pub must: Vec<FieldCondition>,
}

/// A single predicate on one payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub key: String,
    pub predicate: MatchPredicate,
}

/// How a payload field is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPredicate {
    /// Field equals the value exactly.
    Value(String),
    /// Field equals any of the listed values.
    Any(Vec<String>),
}

impl RetrievalConstraint {
    /// A constraint from a non-empty condition list.
    pub fn new(must: Vec<FieldCondition>) -> Option<Self> {
        if must.is_empty() {
            None
        } else {
            Some(Self { must })
        }
    }
}

impl FieldCondition {
    /// Field-equality condition.
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            predicate: MatchPredicate::Value(value.into()),
        }
    }

    /// Field-membership condition.
    pub fn any_of(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            predicate: MatchPredicate::Any(values),
        }
    }
}
