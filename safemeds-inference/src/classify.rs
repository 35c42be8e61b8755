//! Intent classification over the fixed four-label taxonomy.

use tracing::debug;

use safemeds_core::errors::SafeMedsResult;
use safemeds_core::intent::IntentLabel;
use safemeds_core::traits::IIntentClassifier;

use crate::client::{ChatMessage, InferenceClient};

/// Classification runs at temperature 0; the label must be reproducible.
const CLASSIFY_TEMPERATURE: f32 = 0.0;

/// The classifier prompt. The taxonomy, the symptom rule, and the final
/// priority order are fixed; the model must return exactly one label.
fn classifier_prompt(query: &str) -> String {
    format!(
        r#"You are a strict medical intent classifier.

You MUST return exactly ONE label:

EMERGENCY_ALERT
SEARCH_DRUGS
BLOCK_ADVERSARIAL
CLARIFY_SYMPTOMS

ABSOLUTE RULE: if the input contains ANY real symptom word, even one,
it is SEARCH_DRUGS. Never treat symptoms as vague. Symptoms include (but
are not limited to): cough, fever, headache, pain, nausea, vomiting, cold,
flu, acne, rash, swelling, infection, sore throat, dizziness, fatigue,
weakness, stomach ache, diarrhea, allergy, itching.

EMERGENCY RULE: return EMERGENCY_ALERT if the input mentions breathing
trouble, chest pain, unconsciousness, severe bleeding, a serious allergic
reaction, or any life-threatening language. Emergency ALWAYS overrides the
symptom rule.

ADVERSARIAL RULE: return BLOCK_ADVERSARIAL ONLY if no symptom, body part,
or condition is mentioned at all and the intent is clearly drug-seeking or
harmful ("Give me any drug", "I want pills", "Recommend something strong",
"I need a high", "Just prescribe me something", "How to overdose").

VAGUE RULE: return CLARIFY_SYMPTOMS ONLY if no symptom, body part, or
condition is mentioned at all ("I feel bad", "I am sick", "Something is
wrong").

FINAL PRIORITY: 1. Emergency  2. Any symptom -> SEARCH_DRUGS
3. Otherwise -> CLARIFY_SYMPTOMS

Return ONLY the label.

User input:
"{query}""#
    )
}

impl IIntentClassifier for InferenceClient {
    fn classify(&self, query: &str) -> SafeMedsResult<IntentLabel> {
        let messages = [ChatMessage {
            role: "user",
            content: classifier_prompt(query),
        }];
        let raw = self.chat(&messages, CLASSIFY_TEMPERATURE)?;
        let label = IntentLabel::parse_raw(&raw);
        debug!(raw = %raw.trim(), %label, "intent classified");
        Ok(label)
    }
}
