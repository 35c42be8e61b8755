use serde::{Deserialize, Serialize};

/// Session-scoped patient constraints driving both retrieval filtering and
/// post-hoc evaluation.
///
/// Owned exclusively by the session, mutated only through explicit user
/// toggles, never shared across sessions. A pipeline run takes one snapshot
/// of this value up front and never re-reads it mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyProfile {
    /// Patient is pregnant: block FDA category C/D/X medications.
    pub pregnancy_risk: bool,
    /// Patient can access prescription medications. When false, retrieval
    /// is restricted to items also sold over-the-counter.
    pub prescription_only_ok: bool,
}

impl Default for SafetyProfile {
    fn default() -> Self {
        Self {
            pregnancy_risk: false,
            prescription_only_ok: true,
        }
    }
}

impl SafetyProfile {
    /// Whether any retrieval constraint follows from this profile.
    pub fn is_unconstrained(&self) -> bool {
        !self.pregnancy_risk && self.prescription_only_ok
    }
}
