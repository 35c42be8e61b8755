//! Decision table over the closed intent taxonomy.
//!
//! Priority order is the core invariant here: labels are not mutually
//! exclusive by construction, so the table is evaluated first-match-wins
//! with emergency at the top. The order lives in exactly one place
//! ([`IntentGate::decide`]) and nowhere else.

use safemeds_core::intent::IntentLabel;
use safemeds_core::models::{BlockReason, PipelineOutcome};
use safemeds_core::traits::IIntentClassifier;
use tracing::{debug, warn};

/// What the gate decided for this query.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Valid clinical query, continue to retrieval.
    Proceed,
    /// Halt with a terminal outcome; retrieval never runs.
    Halt(PipelineOutcome),
}

/// The intent gate. Stateless; owns the fail-open policy for classifier
/// outages.
pub struct IntentGate;

impl IntentGate {
    /// Classify `query` and apply the decision table.
    ///
    /// Classifier failure triggers [`Self::fail_open`]: the query proceeds
    /// as a drug search rather than being blocked. An unreachable
    /// classifier silently refusing care-seeking users is the worse
    /// failure mode than one unfiltered search.
    pub fn classify_and_gate(
        classifier: &dyn IIntentClassifier,
        query: &str,
    ) -> GateDecision {
        let label = match classifier.classify(query) {
            Ok(label) => label,
            Err(e) => return Self::fail_open(e),
        };
        debug!(%label, "query classified");
        Self::decide(label)
    }

    /// The fixed decision table, first match wins:
    /// 1. emergency → halt, refer to emergency services
    /// 2. adversarial → halt, refuse without clinical specificity
    /// 3. clarify → halt, ask for concrete symptoms
    /// 4. otherwise → proceed to retrieval
    pub fn decide(label: IntentLabel) -> GateDecision {
        match label {
            IntentLabel::EmergencyAlert => {
                GateDecision::Halt(PipelineOutcome::Blocked(BlockReason::EmergencyAlert))
            }
            IntentLabel::BlockAdversarial => {
                GateDecision::Halt(PipelineOutcome::Blocked(BlockReason::AdversarialRequest))
            }
            IntentLabel::ClarifySymptoms => {
                GateDecision::Halt(PipelineOutcome::Blocked(BlockReason::VagueSymptoms))
            }
            IntentLabel::SearchDrugs => GateDecision::Proceed,
        }
    }

    /// Named fail-open policy: classification failure continues the run as
    /// a drug search. The direction of this fallback (favor continuing
    /// over blocking) is deliberate and load-bearing.
    fn fail_open(error: safemeds_core::SafeMedsError) -> GateDecision {
        warn!(%error, "intent classifier unavailable, failing open to drug search");
        GateDecision::Proceed
    }
}
