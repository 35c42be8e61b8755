//! # safemeds-store
//!
//! Everything that touches the vector store: the REST client, the
//! translation of retrieval constraints into wire filters, normalization of
//! the store's heterogeneous hit shapes into one `Candidate` sequence, the
//! retriever adapter the pipeline consumes, and the offline indexing job
//! that populates the collection from the tabular drug dataset.

pub mod client;
pub mod filter;
pub mod indexer;
pub mod normalize;
pub mod retriever;

pub use client::VectorStoreClient;
pub use indexer::{IndexReport, Indexer};
pub use retriever::RetrieverAdapter;
