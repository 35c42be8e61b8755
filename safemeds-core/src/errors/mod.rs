//! Error families, one per subsystem, unified under [`SafeMedsError`].

mod embedding_error;
mod inference_error;
mod pipeline_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use inference_error::InferenceError;
pub use pipeline_error::PipelineError;
pub use store_error::StoreError;

/// Umbrella error for the whole system.
#[derive(Debug, thiserror::Error)]
pub enum SafeMedsError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Result alias used across the workspace.
pub type SafeMedsResult<T> = Result<T, SafeMedsError>;
