//! Deterministic hashing embedding provider.
//!
//! Buckets term frequencies into a fixed-dimension vector and L2-normalizes
//! the result. Not semantically rich, but always available: the last link
//! of the fallback chain, and the provider of choice for tests and
//! air-gapped environments.

use std::collections::HashMap;

use safemeds_core::errors::SafeMedsResult;
use safemeds_core::traits::IEmbeddingProvider;

/// Hashing fallback provider.
pub struct HashingFallback {
    dimensions: usize,
}

impl HashingFallback {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a bucket index for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let terms: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.len() >= 2)
            .map(str::to_lowercase)
            .collect();

        let mut vector = vec![0.0f32; self.dimensions];
        if terms.is_empty() {
            return vector;
        }

        let mut counts: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *counts.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        for (term, count) in counts {
            // Longer terms carry more signal than short near-stopwords.
            let weight = (count / total) * (1.0 + (term.len() as f32).ln());
            vector[Self::bucket(term, self.dimensions)] += weight;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl IEmbeddingProvider for HashingFallback {
    fn embed(&self, text: &str) -> SafeMedsResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> SafeMedsResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_text() {
        let provider = HashingFallback::new(64);
        assert_eq!(
            provider.embed("ibuprofen for headache").unwrap(),
            provider.embed("ibuprofen for headache").unwrap()
        );
    }

    #[test]
    fn output_has_requested_dimensions() {
        let provider = HashingFallback::new(384);
        assert_eq!(provider.embed("fever").unwrap().len(), 384);
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let provider = HashingFallback::new(16);
        assert!(provider.embed("").unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn non_empty_text_is_unit_norm() {
        let provider = HashingFallback::new(64);
        let v = provider.embed("sharp stomach pain after eating").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
