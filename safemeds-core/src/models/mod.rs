//! Data model for the safety-gated retrieval pipeline.

pub mod candidate;
pub mod constraint;
pub mod evaluation;
pub mod outcome;
pub mod profile;

pub use candidate::{Candidate, PregnancyCategory};
pub use constraint::{FieldCondition, MatchPredicate, RetrievalConstraint};
pub use evaluation::{ApprovedCandidates, Evaluation, Rejection};
pub use outcome::{BlockReason, PipelineOutcome};
pub use profile::SafetyProfile;
