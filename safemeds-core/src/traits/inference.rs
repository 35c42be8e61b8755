use crate::errors::SafeMedsResult;
use crate::intent::IntentLabel;
use crate::models::{ApprovedCandidates, SafetyProfile};

/// Intent classification collaborator.
pub trait IIntentClassifier: Send + Sync {
    /// Classify a query into the closed intent taxonomy.
    ///
    /// Transport failures are errors; the intent gate owns the fail-open
    /// policy, not the classifier.
    fn classify(&self, query: &str) -> SafeMedsResult<IntentLabel>;
}

/// Recommendation synthesis collaborator.
///
/// Only ever invoked with a non-empty, evaluator-approved candidate set;
/// the [`ApprovedCandidates`] parameter makes that precondition structural.
pub trait ISynthesizer: Send + Sync {
    fn synthesize(
        &self,
        query: &str,
        approved: &ApprovedCandidates,
        profile: &SafetyProfile,
    ) -> SafeMedsResult<String>;
}

/// Audio transcription collaborator (alternate query source).
pub trait ITranscriber: Send + Sync {
    fn transcribe(&self, audio: &[u8], filename: &str) -> SafeMedsResult<String>;
}
