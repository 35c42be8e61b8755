/// Hosted inference service errors (classification, synthesis, transcription).
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference credential missing: set the {var} environment variable")]
    MissingCredential { var: String },

    #[error("inference request failed: {reason}")]
    Transport { reason: String },

    #[error("inference service returned an unexpected response: {reason}")]
    BadResponse { reason: String },

    #[error("inference service returned an empty completion")]
    EmptyCompletion,
}
