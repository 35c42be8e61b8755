//! # safemeds-inference
//!
//! Client for the hosted text/chat/audio inference service. Three calls are
//! consumed: intent classification over the fixed four-label taxonomy,
//! pharmacist-style recommendation synthesis, and voice transcription. The
//! API credential comes from the process environment at construction.

pub mod classify;
pub mod client;
pub mod synthesize;
pub mod transcribe;

pub use client::InferenceClient;
