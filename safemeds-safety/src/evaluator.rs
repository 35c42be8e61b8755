//! The authoritative safety gate.
//!
//! Re-checks every retrieved candidate against the profile snapshot,
//! independent of whatever the retrieval pre-filter already enforced. A
//! permissive or bypassed filter must never let an unsafe candidate reach
//! synthesis.

use safemeds_core::models::{
    ApprovedCandidates, Candidate, Evaluation, PregnancyCategory, Rejection, SafetyProfile,
};
use tracing::{debug, warn};

/// Pregnancy tiers allowed through under pregnancy risk.
pub const PREGNANCY_ALLOWED: [PregnancyCategory; 3] = [
    PregnancyCategory::A,
    PregnancyCategory::B,
    PregnancyCategory::N,
];

/// Post-retrieval safety evaluator. Pure and deterministic given its
/// inputs; holds no state.
pub struct SafetyEvaluator;

impl SafetyEvaluator {
    /// Re-validate `candidates` against `profile`.
    ///
    /// Without pregnancy risk this is the identity on the input sequence.
    /// With pregnancy risk, only tiers in [`PREGNANCY_ALLOWED`] survive;
    /// every drop is recorded with the candidate's identity and reason.
    /// Input order (descending score) is preserved among retained items.
    ///
    /// Must be called with a non-empty candidate sequence; an empty
    /// retrieval is `NoCandidates` and never reaches the evaluator.
    pub fn evaluate(profile: &SafetyProfile, candidates: Vec<Candidate>) -> Evaluation {
        debug_assert!(!candidates.is_empty(), "empty retrieval bypasses evaluation");

        if !profile.pregnancy_risk {
            debug!(count = candidates.len(), "standard safety checks passed");
            // ApprovedCandidates::new only fails on empty input, which the
            // pipeline has already ruled out.
            return match ApprovedCandidates::new(candidates) {
                Some(approved) => Evaluation::Approved {
                    approved,
                    rejections: Vec::new(),
                },
                None => Evaluation::Rejected {
                    rejections: Vec::new(),
                },
            };
        }

        let mut retained = Vec::new();
        let mut rejections = Vec::new();

        for candidate in candidates {
            if PREGNANCY_ALLOWED.contains(&candidate.pregnancy_category) {
                retained.push(candidate);
            } else {
                warn!(
                    drug = %candidate.drug_name,
                    category = %candidate.pregnancy_category,
                    "blocking candidate under pregnancy protocol"
                );
                rejections.push(Rejection {
                    drug_name: candidate.drug_name,
                    category: candidate.pregnancy_category,
                    reason: format!(
                        "pregnancy category {} is not in the allowed set (A/B/N)",
                        candidate.pregnancy_category
                    ),
                });
            }
        }

        match ApprovedCandidates::new(retained) {
            Some(approved) => Evaluation::Approved {
                approved,
                rejections,
            },
            None => Evaluation::Rejected { rejections },
        }
    }
}
