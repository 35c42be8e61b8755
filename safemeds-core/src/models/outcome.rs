use serde::{Deserialize, Serialize};

use super::evaluation::Rejection;

/// Why the intent gate halted a run before retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    /// Life-threatening language; the user must contact emergency services.
    EmergencyAlert,
    /// Drug-seeking pattern with no clinical specificity.
    AdversarialRequest,
    /// Too vague for a safe recommendation; ask for concrete symptoms.
    VagueSymptoms,
}

impl BlockReason {
    /// Fixed user-facing message for this halt.
    pub fn user_message(self) -> &'static str {
        match self {
            BlockReason::EmergencyAlert => {
                "Emergency intent detected. Please call emergency services (911/112) \
                 immediately. Do not rely on this system for life-threatening situations."
            }
            BlockReason::AdversarialRequest => {
                "Request blocked: the query lacks clinical specificity and matches a \
                 drug-seeking pattern. No medication is dispensed without specific symptoms."
            }
            BlockReason::VagueSymptoms => {
                "The description is too vague for a safe recommendation. Please describe \
                 specific symptoms, e.g. \"I have a throbbing headache\" or \"sharp stomach pain\"."
            }
        }
    }
}

/// Tagged result of one whole pipeline run.
///
/// Every stage converts failure into one of these variants; nothing is
/// raised across the pipeline boundary and nothing is retried. A
/// `Recommendation` can only be produced from a non-empty,
/// profile-validated candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineOutcome {
    /// The intent gate halted the run.
    Blocked(BlockReason),
    /// Retrieval itself returned nothing. Not an error.
    NoCandidates,
    /// Retrieval returned candidates but the evaluator dropped all of them.
    /// An explicit safety intervention, distinct from `NoCandidates`.
    AllRejected { rejections: Vec<Rejection> },
    /// Synthesized recommendation text from approved candidates.
    Recommendation(String),
    /// A collaborator call failed; the run terminated with this
    /// user-visible error string instead of raising to the caller.
    Failed(String),
}

impl PipelineOutcome {
    /// Whether this outcome ended the run before synthesis.
    pub fn is_terminal_before_synthesis(&self) -> bool {
        !matches!(self, PipelineOutcome::Recommendation(_))
    }
}
