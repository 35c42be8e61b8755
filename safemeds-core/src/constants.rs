/// SafeMeds system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the vector store collection holding the drug knowledge base.
pub const COLLECTION_NAME: &str = "drugs_knowledge_base";

/// Dimensionality of the embedding model (MiniLM class).
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Maximum number of candidates returned by one retrieval call.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 4;

/// Batch size for bulk point upserts during indexing.
pub const INDEX_BATCH_SIZE: usize = 100;

/// Side-effect text is truncated to this length before indexing.
pub const MAX_SIDE_EFFECTS_LEN: usize = 500;

/// Payload value used when a dataset field is missing.
pub const UNKNOWN_FIELD: &str = "Unknown";
