//! Profile → retrieval constraint translation.
//!
//! Deterministic, pure, no I/O. The constraint is a coarse pre-filter
//! applied inside the vector store; the final safety decision belongs to
//! the evaluator, so the pre-filter must never be narrower than the
//! evaluator's allow-list.

use safemeds_core::models::{FieldCondition, RetrievalConstraint, SafetyProfile};

use crate::evaluator::PREGNANCY_ALLOWED;

/// Payload field holding the FDA pregnancy tier.
pub const FIELD_PREGNANCY_CATEGORY: &str = "pregnancy_category";
/// Payload field holding the prescription status.
pub const FIELD_RX_OTC: &str = "rx_otc";
/// Prescription-status value for items also sold over-the-counter.
pub const RX_OTC_BOTH: &str = "Rx/OTC";

/// Build the retrieval filter for the given profile snapshot.
///
/// - Pregnancy risk restricts the pregnancy tier to the evaluator's
///   allow-list (match-any over A/B/N), so pre-filtering can only shrink
///   the candidate pool toward what the evaluator would keep anyway.
/// - A profile without prescription access restricts to items sold
///   over-the-counter as well.
/// - With no applicable predicate the search runs unconstrained (`None`).
pub fn build_filter(profile: &SafetyProfile) -> Option<RetrievalConstraint> {
    let mut must = Vec::new();

    if profile.pregnancy_risk {
        must.push(FieldCondition::any_of(
            FIELD_PREGNANCY_CATEGORY,
            PREGNANCY_ALLOWED
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        ));
    }

    if !profile.prescription_only_ok {
        must.push(FieldCondition::equals(FIELD_RX_OTC, RX_OTC_BOTH));
    }

    RetrievalConstraint::new(must)
}
