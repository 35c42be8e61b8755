//! Property tests for the safety invariants.
//!
//! These are the load-bearing guarantees of the system: no unsafe tier ever
//! passes the evaluator under pregnancy risk, and the evaluator is exactly
//! the identity without it.

use proptest::prelude::*;

use safemeds_core::models::{Candidate, Evaluation, PregnancyCategory, SafetyProfile};
use safemeds_safety::constraints::build_filter;
use safemeds_safety::evaluator::{SafetyEvaluator, PREGNANCY_ALLOWED};

fn arb_category() -> impl Strategy<Value = PregnancyCategory> {
    prop_oneof![
        Just(PregnancyCategory::A),
        Just(PregnancyCategory::B),
        Just(PregnancyCategory::C),
        Just(PregnancyCategory::D),
        Just(PregnancyCategory::X),
        Just(PregnancyCategory::N),
        Just(PregnancyCategory::Unknown),
    ]
}

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    ("[A-Za-z]{3,16}", arb_category(), 0.0f32..=1.0f32).prop_map(|(name, cat, score)| Candidate {
        drug_name: name,
        condition: "Condition".to_string(),
        pregnancy_category: cat,
        rx_otc: "Rx".to_string(),
        side_effects: String::new(),
        score,
    })
}

fn arb_profile() -> impl Strategy<Value = SafetyProfile> {
    (any::<bool>(), any::<bool>()).prop_map(|(pregnancy_risk, prescription_only_ok)| {
        SafetyProfile {
            pregnancy_risk,
            prescription_only_ok,
        }
    })
}

proptest! {
    /// Under pregnancy risk the output never contains C, D, X, or an
    /// out-of-vocabulary tier.
    #[test]
    fn no_unsafe_tier_survives_pregnancy_risk(
        candidates in prop::collection::vec(arb_candidate(), 1..12)
    ) {
        let profile = SafetyProfile { pregnancy_risk: true, prescription_only_ok: true };
        if let Evaluation::Approved { approved, .. } =
            SafetyEvaluator::evaluate(&profile, candidates)
        {
            for c in approved.as_slice() {
                prop_assert!(PREGNANCY_ALLOWED.contains(&c.pregnancy_category));
            }
        }
    }

    /// Every input candidate is accounted for exactly once: either retained
    /// or attributed in the rejection list.
    #[test]
    fn every_drop_is_attributed(
        candidates in prop::collection::vec(arb_candidate(), 1..12)
    ) {
        let profile = SafetyProfile { pregnancy_risk: true, prescription_only_ok: true };
        let total = candidates.len();
        match SafetyEvaluator::evaluate(&profile, candidates) {
            Evaluation::Approved { approved, rejections } => {
                prop_assert_eq!(approved.len() + rejections.len(), total);
            }
            Evaluation::Rejected { rejections } => {
                prop_assert_eq!(rejections.len(), total);
            }
        }
    }

    /// Without pregnancy risk the evaluator is the identity on its input:
    /// same members, same order.
    #[test]
    fn no_risk_preserves_membership_and_order(
        candidates in prop::collection::vec(arb_candidate(), 1..12)
    ) {
        let profile = SafetyProfile { pregnancy_risk: false, prescription_only_ok: true };
        match SafetyEvaluator::evaluate(&profile, candidates.clone()) {
            Evaluation::Approved { approved, rejections } => {
                prop_assert!(rejections.is_empty());
                prop_assert_eq!(approved.as_slice(), candidates.as_slice());
            }
            Evaluation::Rejected { .. } => prop_assert!(false, "identity case rejected"),
        }
    }

    /// Retained items keep their relative input order.
    #[test]
    fn retained_order_is_input_order(
        candidates in prop::collection::vec(arb_candidate(), 1..12)
    ) {
        let profile = SafetyProfile { pregnancy_risk: true, prescription_only_ok: true };
        let expected: Vec<String> = candidates
            .iter()
            .filter(|c| PREGNANCY_ALLOWED.contains(&c.pregnancy_category))
            .map(|c| c.drug_name.clone())
            .collect();
        if let Evaluation::Approved { approved, .. } =
            SafetyEvaluator::evaluate(&profile, candidates)
        {
            let actual: Vec<String> = approved
                .as_slice()
                .iter()
                .map(|c| c.drug_name.clone())
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// The constraint builder is pure: equal profiles yield equal filters.
    #[test]
    fn builder_is_pure_and_idempotent(profile in arb_profile()) {
        prop_assert_eq!(build_filter(&profile), build_filter(&profile));
    }
}
