//! HTTP provider for a MiniLM-class embedding inference server.
//!
//! Wire format: `POST {endpoint}` with `{"texts": [...]}`, response
//! `{"embeddings": [[f32; dims], ...]}`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use safemeds_core::errors::{EmbeddingError, SafeMedsResult};
use safemeds_core::traits::IEmbeddingProvider;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Blocking HTTP embedding provider.
pub struct HttpEmbeddingProvider {
    http: reqwest::blocking::Client,
    endpoint: String,
    dimensions: usize,
}

impl HttpEmbeddingProvider {
    pub fn new(endpoint: String, dimensions: usize, timeout_secs: u64) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint,
            dimensions,
        }
    }

    fn request(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&EmbedRequest { texts })
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("server returned {}", response.status()),
            }
            .into());
        }

        let body: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("malformed response: {e}"),
            })?;

        for vector in &body.embeddings {
            if vector.len() != self.dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                }
                .into());
            }
        }

        Ok(body.embeddings)
    }
}

impl IEmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> SafeMedsResult<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.request(&texts)?;
        vectors.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "server returned no embeddings".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self.request(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "server returned {} embeddings for {} texts",
                    vectors.len(),
                    texts.len()
                ),
            }
            .into());
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "http-minilm"
    }

    fn is_available(&self) -> bool {
        // Availability is discovered per-call; the chain treats request
        // failure the same way.
        true
    }
}
