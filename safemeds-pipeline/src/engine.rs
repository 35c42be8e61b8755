//! PipelineEngine: the five stages in strict sequence with early exit.
//!
//! gate → constraints → retrieve → evaluate → synthesize. Any stage may
//! terminate the run with a user-visible outcome; no error crosses the
//! engine boundary and nothing is retried.

use tracing::{debug, info, warn};

use safemeds_core::config::RetrievalConfig;
use safemeds_core::models::{Evaluation, PipelineOutcome, SafetyProfile};
use safemeds_core::traits::{IIntentClassifier, IRetriever, ISynthesizer};
use safemeds_safety::constraints::build_filter;
use safemeds_safety::evaluator::SafetyEvaluator;
use safemeds_triage::gate::{GateDecision, IntentGate};

use crate::session::SessionContext;

/// The pipeline engine. Borrows its collaborators; holds no session state.
pub struct PipelineEngine<'a> {
    classifier: &'a dyn IIntentClassifier,
    retriever: &'a dyn IRetriever,
    synthesizer: &'a dyn ISynthesizer,
    config: RetrievalConfig,
}

impl<'a> PipelineEngine<'a> {
    pub fn new(
        classifier: &'a dyn IIntentClassifier,
        retriever: &'a dyn IRetriever,
        synthesizer: &'a dyn ISynthesizer,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            classifier,
            retriever,
            synthesizer,
            config,
        }
    }

    /// Run one full pipeline pass for a session.
    ///
    /// Takes the profile snapshot up front; the same value feeds both the
    /// constraint builder and the evaluator.
    pub fn run_session(&self, session: &mut SessionContext, query: &str) -> PipelineOutcome {
        let profile = session.profile_snapshot();
        session.record_query();
        self.run(query, &profile)
    }

    /// Run one full pipeline pass against a fixed profile snapshot.
    pub fn run(&self, query: &str, profile: &SafetyProfile) -> PipelineOutcome {
        // Stage 1: intent gate.
        match IntentGate::classify_and_gate(self.classifier, query) {
            GateDecision::Proceed => debug!("gate passed, delegating to retrieval"),
            GateDecision::Halt(outcome) => {
                info!(?outcome, "gate halted the run");
                return outcome;
            }
        }

        // Stage 2: profile → retrieval constraint.
        let constraint = build_filter(profile);
        debug!(constrained = constraint.is_some(), "retrieval filter built");

        // Stage 3: retrieval.
        let candidates =
            match self
                .retriever
                .retrieve(query, constraint.as_ref(), self.config.limit)
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(error = %e, "retrieval failed, terminating run");
                    return PipelineOutcome::Failed(format!("Retrieval unavailable: {e}"));
                }
            };

        if candidates.is_empty() {
            info!("retrieval returned no candidates");
            return PipelineOutcome::NoCandidates;
        }

        // Stage 4: safety evaluation against the same profile snapshot.
        let approved = match SafetyEvaluator::evaluate(profile, candidates) {
            Evaluation::Approved {
                approved,
                rejections,
            } => {
                info!(
                    approved = approved.len(),
                    rejected = rejections.len(),
                    "candidates approved for synthesis"
                );
                approved
            }
            Evaluation::Rejected { rejections } => {
                info!(rejected = rejections.len(), "all candidates rejected");
                return PipelineOutcome::AllRejected { rejections };
            }
        };

        // Stage 5: synthesis. Reachable only with a non-empty approved set.
        match self.synthesizer.synthesize(query, &approved, profile) {
            Ok(text) => PipelineOutcome::Recommendation(text),
            Err(e) => {
                warn!(error = %e, "synthesis failed, terminating run");
                PipelineOutcome::Failed(format!("Recommendation unavailable: {e}"))
            }
        }
    }
}
