//! # safemeds-embeddings
//!
//! Turns query and document text into fixed-length vectors for the drug
//! knowledge base. One primary provider (an HTTP inference server running a
//! MiniLM-class model) backed by a deterministic hashing fallback, with a
//! cache in front and a degradation log for every fallback taken.

pub mod cache;
pub mod engine;
pub mod fallback;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use fallback::{DegradationEvent, FallbackChain};
