//! Closed intent taxonomy for clinical queries.
//!
//! The hosted classifier returns free-form text; `parse_raw` maps it onto
//! this closed set at the adapter boundary so nothing downstream ever
//! string-matches raw model output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a query's clinical urgency and validity.
///
/// Produced once per query by the external classifier, consumed only by the
/// intent gate, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentLabel {
    /// Life-threatening language: bypass retrieval, refer to emergency services.
    EmergencyAlert,
    /// A valid clinical query with at least one concrete symptom.
    SearchDrugs,
    /// No symptom, body part, or condition mentioned; ask for specifics.
    ClarifySymptoms,
    /// Drug-seeking or harmful request with no clinical content.
    BlockAdversarial,
}

impl IntentLabel {
    /// Wire name of the label, as the classifier prompt spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::EmergencyAlert => "EMERGENCY_ALERT",
            IntentLabel::SearchDrugs => "SEARCH_DRUGS",
            IntentLabel::ClarifySymptoms => "CLARIFY_SYMPTOMS",
            IntentLabel::BlockAdversarial => "BLOCK_ADVERSARIAL",
        }
    }

    /// Map raw classifier output onto the closed label set.
    ///
    /// Labels are not mutually exclusive in free-form output, so matching
    /// follows the gate's priority order: emergency wins over everything,
    /// then adversarial, then clarify. Output that contains none of the
    /// known labels falls back to `SearchDrugs`, the fail-open direction,
    /// since silently blocking a care-seeking user is the worse failure.
    pub fn parse_raw(raw: &str) -> IntentLabel {
        let upper = raw.to_ascii_uppercase();
        if upper.contains("EMERGENCY") {
            IntentLabel::EmergencyAlert
        } else if upper.contains("ADVERSARIAL") {
            IntentLabel::BlockAdversarial
        } else if upper.contains("CLARIFY") {
            IntentLabel::ClarifySymptoms
        } else {
            IntentLabel::SearchDrugs
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_labels() {
        assert_eq!(
            IntentLabel::parse_raw("EMERGENCY_ALERT"),
            IntentLabel::EmergencyAlert
        );
        assert_eq!(IntentLabel::parse_raw("SEARCH_DRUGS"), IntentLabel::SearchDrugs);
        assert_eq!(
            IntentLabel::parse_raw("CLARIFY_SYMPTOMS"),
            IntentLabel::ClarifySymptoms
        );
        assert_eq!(
            IntentLabel::parse_raw("BLOCK_ADVERSARIAL"),
            IntentLabel::BlockAdversarial
        );
    }

    #[test]
    fn emergency_wins_over_other_labels() {
        let raw = "EMERGENCY_ALERT SEARCH_DRUGS";
        assert_eq!(IntentLabel::parse_raw(raw), IntentLabel::EmergencyAlert);
        let raw = "BLOCK_ADVERSARIAL EMERGENCY_ALERT";
        assert_eq!(IntentLabel::parse_raw(raw), IntentLabel::EmergencyAlert);
    }

    #[test]
    fn tolerates_prose_around_label() {
        let raw = "The label is: CLARIFY_SYMPTOMS.";
        assert_eq!(IntentLabel::parse_raw(raw), IntentLabel::ClarifySymptoms);
    }

    #[test]
    fn unparseable_output_falls_back_to_search() {
        assert_eq!(IntentLabel::parse_raw(""), IntentLabel::SearchDrugs);
        assert_eq!(IntentLabel::parse_raw("banana"), IntentLabel::SearchDrugs);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            IntentLabel::parse_raw("emergency_alert"),
            IntentLabel::EmergencyAlert
        );
    }
}
