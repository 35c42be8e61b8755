//! # safemeds-safety
//!
//! The two pure stages of the pipeline: translating a safety profile into a
//! retrieval pre-filter, and re-validating retrieved candidates against the
//! same profile. The evaluator is the authoritative gate; the pre-filter is
//! only a recall optimization and is never trusted.

pub mod constraints;
pub mod evaluator;

pub use constraints::build_filter;
pub use evaluator::SafetyEvaluator;
