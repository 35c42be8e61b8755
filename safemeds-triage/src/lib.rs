//! # safemeds-triage
//!
//! The intent gate, the first pipeline stage. Delegates label production
//! to the external classifier and applies a fixed decision table to decide
//! whether retrieval runs at all.

pub mod gate;

pub use gate::{GateDecision, IntentGate};
