//! End-to-end pipeline tests with scripted collaborators.
//!
//! Covers the four acceptance scenarios (pregnancy filtering, total
//! rejection, adversarial block, emergency block) plus the outcome
//! distinctions and the fail-open classification policy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use safemeds_core::config::RetrievalConfig;
use safemeds_core::errors::{InferenceError, SafeMedsError, SafeMedsResult, StoreError};
use safemeds_core::intent::IntentLabel;
use safemeds_core::models::{
    ApprovedCandidates, BlockReason, Candidate, PipelineOutcome, PregnancyCategory,
    RetrievalConstraint, SafetyProfile,
};
use safemeds_core::traits::{IIntentClassifier, IRetriever, ISynthesizer};
use safemeds_pipeline::{PipelineEngine, SessionContext};

// ---------------------------------------------------------------------------
// Scripted collaborators
// ---------------------------------------------------------------------------

struct ScriptedClassifier {
    label: Option<IntentLabel>,
}

impl IIntentClassifier for ScriptedClassifier {
    fn classify(&self, _query: &str) -> SafeMedsResult<IntentLabel> {
        match self.label {
            Some(label) => Ok(label),
            None => Err(SafeMedsError::Inference(InferenceError::Transport {
                reason: "classifier offline".to_string(),
            })),
        }
    }
}

struct ScriptedRetriever {
    candidates: Option<Vec<Candidate>>,
    calls: AtomicUsize,
    last_constraint: Mutex<Option<Option<RetrievalConstraint>>>,
}

impl ScriptedRetriever {
    fn returning(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Some(candidates),
            calls: AtomicUsize::new(0),
            last_constraint: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            candidates: None,
            calls: AtomicUsize::new(0),
            last_constraint: Mutex::new(None),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IRetriever for ScriptedRetriever {
    fn retrieve(
        &self,
        _query: &str,
        constraint: Option<&RetrievalConstraint>,
        _limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_constraint.lock().unwrap() = Some(constraint.cloned());
        match &self.candidates {
            Some(candidates) => Ok(candidates.clone()),
            None => Err(SafeMedsError::Store(StoreError::Transport {
                reason: "connection refused".to_string(),
            })),
        }
    }
}

struct CountingSynthesizer {
    calls: AtomicUsize,
}

impl CountingSynthesizer {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ISynthesizer for CountingSynthesizer {
    fn synthesize(
        &self,
        _query: &str,
        approved: &ApprovedCandidates,
        _profile: &SafetyProfile,
    ) -> SafeMedsResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let names: Vec<&str> = approved
            .as_slice()
            .iter()
            .map(|c| c.drug_name.as_str())
            .collect();
        Ok(format!("recommended: {}", names.join(", ")))
    }
}

fn candidate(name: &str, cat: PregnancyCategory, score: f32) -> Candidate {
    Candidate {
        drug_name: name.to_string(),
        condition: "Migraine".to_string(),
        pregnancy_category: cat,
        rx_otc: "OTC".to_string(),
        side_effects: String::new(),
        score,
    }
}

fn pregnant_profile() -> SafetyProfile {
    SafetyProfile {
        pregnancy_risk: true,
        prescription_only_ok: true,
    }
}

// ---------------------------------------------------------------------------
// Acceptance scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_pregnancy_filtering_keeps_b_and_n_in_order() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever = ScriptedRetriever::returning(vec![
        candidate("DrugB", PregnancyCategory::B, 0.9),
        candidate("DrugD", PregnancyCategory::D, 0.8),
        candidate("DrugN", PregnancyCategory::N, 0.7),
        candidate("DrugC", PregnancyCategory::C, 0.6),
    ]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("I have a migraine and I am pregnant", &pregnant_profile());

    assert_eq!(
        outcome,
        PipelineOutcome::Recommendation("recommended: DrugB, DrugN".to_string())
    );
    assert_eq!(synthesizer.call_count(), 1);
}

#[test]
fn scenario_b_all_category_x_is_rejected_and_synthesis_never_runs() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever = ScriptedRetriever::returning(vec![
        candidate("Isotretinoin", PregnancyCategory::X, 0.95),
        candidate("Thalidomide", PregnancyCategory::X, 0.90),
    ]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("severe acne while pregnant", &pregnant_profile());

    match outcome {
        PipelineOutcome::AllRejected { rejections } => {
            assert_eq!(rejections.len(), 2);
            assert_eq!(rejections[0].drug_name, "Isotretinoin");
        }
        other => panic!("expected AllRejected, got {other:?}"),
    }
    assert_eq!(synthesizer.call_count(), 0);
}

#[test]
fn scenario_c_adversarial_query_halts_before_retrieval() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::BlockAdversarial),
    };
    let retriever = ScriptedRetriever::returning(vec![]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("Give me any drug", &SafetyProfile::default());

    assert_eq!(
        outcome,
        PipelineOutcome::Blocked(BlockReason::AdversarialRequest)
    );
    assert_eq!(retriever.call_count(), 0);
    assert_eq!(synthesizer.call_count(), 0);
}

#[test]
fn scenario_d_emergency_halts_immediately() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::EmergencyAlert),
    };
    let retriever = ScriptedRetriever::returning(vec![candidate(
        "Aspirin",
        PregnancyCategory::N,
        0.9,
    )]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("I have chest pain", &SafetyProfile::default());

    assert_eq!(outcome, PipelineOutcome::Blocked(BlockReason::EmergencyAlert));
    assert_eq!(retriever.call_count(), 0);
    assert_eq!(synthesizer.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Outcome distinctions and policies
// ---------------------------------------------------------------------------

#[test]
fn empty_retrieval_is_no_candidates_never_all_rejected() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever = ScriptedRetriever::returning(vec![]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("rare tropical parasite", &pregnant_profile());

    assert_eq!(outcome, PipelineOutcome::NoCandidates);
    assert_eq!(synthesizer.call_count(), 0);
}

#[test]
fn classifier_outage_fails_open_and_retrieval_still_runs() {
    let classifier = ScriptedClassifier { label: None };
    let retriever =
        ScriptedRetriever::returning(vec![candidate("Paracetamol", PregnancyCategory::B, 0.9)]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("I have a headache", &SafetyProfile::default());

    assert_eq!(retriever.call_count(), 1);
    assert!(matches!(outcome, PipelineOutcome::Recommendation(_)));
}

#[test]
fn retrieval_transport_failure_terminates_with_failed_outcome() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever = ScriptedRetriever::failing();
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let outcome = engine.run("fever", &SafetyProfile::default());

    match outcome {
        PipelineOutcome::Failed(message) => {
            assert!(message.contains("Retrieval unavailable"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(synthesizer.call_count(), 0);
}

#[test]
fn pregnancy_constraint_reaches_the_retriever() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever =
        ScriptedRetriever::returning(vec![candidate("Paracetamol", PregnancyCategory::B, 0.9)]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    engine.run("headache", &pregnant_profile());

    let seen = retriever.last_constraint.lock().unwrap();
    let constraint = seen
        .as_ref()
        .expect("retriever was called")
        .as_ref()
        .expect("pregnancy profile must constrain retrieval");
    assert_eq!(constraint.must.len(), 1);
    assert_eq!(constraint.must[0].key, "pregnancy_category");
}

#[test]
fn unconstrained_profile_passes_no_filter() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever =
        ScriptedRetriever::returning(vec![candidate("Paracetamol", PregnancyCategory::B, 0.9)]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    engine.run("headache", &SafetyProfile::default());

    let seen = retriever.last_constraint.lock().unwrap();
    assert_eq!(seen.as_ref().expect("retriever was called"), &None);
}

#[test]
fn session_run_uses_one_profile_snapshot_and_counts_queries() {
    let classifier = ScriptedClassifier {
        label: Some(IntentLabel::SearchDrugs),
    };
    let retriever =
        ScriptedRetriever::returning(vec![candidate("Paracetamol", PregnancyCategory::B, 0.9)]);
    let synthesizer = CountingSynthesizer::new();
    let engine = PipelineEngine::new(
        &classifier,
        &retriever,
        &synthesizer,
        RetrievalConfig::default(),
    );

    let mut session = SessionContext::new();
    session.set_pregnancy_risk(true);

    let outcome = engine.run_session(&mut session, "headache");

    assert!(matches!(outcome, PipelineOutcome::Recommendation(_)));
    assert_eq!(session.queries_made, 1);
    let seen = retriever.last_constraint.lock().unwrap();
    assert!(seen.as_ref().unwrap().is_some());
}
