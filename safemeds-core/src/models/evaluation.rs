use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, PregnancyCategory};

/// One individually attributable drop made by the safety evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub drug_name: String,
    pub category: PregnancyCategory,
    /// Human-readable reason for the drop.
    pub reason: String,
}

/// Result of re-validating retrieved candidates against the safety profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// At least one candidate survived. Retained items keep their input
    /// order (descending score); every drop is recorded.
    Approved {
        approved: ApprovedCandidates,
        rejections: Vec<Rejection>,
    },
    /// Every candidate was dropped. Distinct from an empty retrieval.
    Rejected { rejections: Vec<Rejection> },
}

/// A non-empty, evaluator-approved candidate set.
///
/// The synthesizer contract requires a non-empty approved set; this wrapper
/// makes the precondition structural. The only way to obtain one is
/// through [`ApprovedCandidates::new`], which refuses empty input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedCandidates(Vec<Candidate>);

impl ApprovedCandidates {
    /// Wrap a candidate set, refusing empty input.
    pub fn new(candidates: Vec<Candidate>) -> Option<Self> {
        if candidates.is_empty() {
            None
        } else {
            Some(Self(candidates))
        }
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the constructor refuses empty input.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ApprovedCandidates {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
