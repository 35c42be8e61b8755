//! Trait seams for the external collaborators.
//!
//! The pipeline depends only on these traits; the concrete HTTP adapters
//! live in their own crates and the tests substitute scripted mocks.

mod embedding;
mod inference;
mod retrieval;
mod store;

pub use embedding::IEmbeddingProvider;
pub use inference::{IIntentClassifier, ISynthesizer, ITranscriber};
pub use retrieval::IRetriever;
pub use store::{IVectorStore, PointRecord};
