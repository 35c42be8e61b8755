//! # safemeds-core
//!
//! Foundation crate for the SafeMeds clinical decision support system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SafeMedsConfig;
pub use errors::{SafeMedsError, SafeMedsResult};
pub use intent::IntentLabel;
pub use models::{
    ApprovedCandidates, BlockReason, Candidate, Evaluation, PipelineOutcome, PregnancyCategory,
    Rejection, RetrievalConstraint, SafetyProfile,
};
