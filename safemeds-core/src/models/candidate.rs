use serde::{Deserialize, Serialize};
use std::fmt;

/// FDA-style pregnancy risk tier attached to a medication record.
///
/// `N` means "not rated". Payload values outside the FDA set decode to
/// `Unknown` at the store boundary; the evaluator treats `Unknown` exactly
/// like the unsafe tiers, never like `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PregnancyCategory {
    A,
    B,
    C,
    D,
    X,
    N,
    /// Payload value outside the FDA vocabulary (e.g. a missing dataset
    /// field indexed as "Unknown"). Never allowed under pregnancy risk.
    Unknown,
}

impl PregnancyCategory {
    /// Decode a payload string. Anything outside the six known values maps
    /// to `Unknown`.
    pub fn parse(raw: &str) -> PregnancyCategory {
        match raw.trim() {
            "A" => PregnancyCategory::A,
            "B" => PregnancyCategory::B,
            "C" => PregnancyCategory::C,
            "D" => PregnancyCategory::D,
            "X" => PregnancyCategory::X,
            "N" => PregnancyCategory::N,
            _ => PregnancyCategory::Unknown,
        }
    }

    /// Wire representation used in vector store payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            PregnancyCategory::A => "A",
            PregnancyCategory::B => "B",
            PregnancyCategory::C => "C",
            PregnancyCategory::D => "D",
            PregnancyCategory::X => "X",
            PregnancyCategory::N => "N",
            PregnancyCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PregnancyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieved medication record with its similarity score.
///
/// Produced by the retriever adapter in descending score order. Candidates
/// are never mutated downstream, only filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub drug_name: String,
    pub condition: String,
    pub pregnancy_category: PregnancyCategory,
    /// Prescription status string as indexed (e.g. "Rx", "OTC", "Rx/OTC").
    pub rx_otc: String,
    pub side_effects: String,
    /// Similarity score from the vector search.
    pub score: f32,
}
