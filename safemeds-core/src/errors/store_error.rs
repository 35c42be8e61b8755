/// Vector store subsystem errors.
///
/// An empty query result is NOT an error: it is a valid outcome the
/// pipeline reports as `NoCandidates`. These variants cover transport and
/// protocol failures only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("vector store request failed: {reason}")]
    Transport { reason: String },

    #[error("vector store returned an unexpected response: {reason}")]
    BadResponse { reason: String },

    #[error("collection {name} does not exist")]
    CollectionMissing { name: String },

    #[error("dataset error: {reason}")]
    Dataset { reason: String },
}
