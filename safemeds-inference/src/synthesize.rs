//! Pharmacist-style recommendation synthesis from approved candidates.

use tracing::info;

use safemeds_core::errors::SafeMedsResult;
use safemeds_core::models::{ApprovedCandidates, Candidate, SafetyProfile};
use safemeds_core::traits::ISynthesizer;

use crate::client::{ChatMessage, InferenceClient};

/// Synthesis runs at near-zero temperature; the wording may vary but the
/// clinical decision must not.
const SYNTHESIZE_TEMPERATURE: f32 = 0.1;

/// Render one candidate as a context block for the prompt.
fn context_block(candidate: &Candidate) -> String {
    format!(
        "---\nDrug Name: {}\nTreats Condition: {}\nSafety Category: {}\nSide Effects: {}\n---\n",
        candidate.drug_name,
        candidate.condition,
        candidate.pregnancy_category,
        candidate.side_effects
    )
}

/// The system prompt, parameterized on the profile snapshot.
///
/// The counter-factual instruction is the load-bearing part: when a
/// perfect-match drug was excluded by the safety rules, the response must
/// say so explicitly instead of silently recommending a weaker match.
fn system_prompt(profile: &SafetyProfile) -> String {
    format!(
        r#"You are SafeMeds, a clinical decision support agent.

USER CONTEXT:
- Pregnancy Status: {}
- Rx Preference: {}

CRITICAL INSTRUCTION, the counter-factual safety check:
if a drug matches the user's condition perfectly but is blocked by the
safety rules (e.g. a category X treatment while the user is pregnant):
1. DO NOT recommend it.
2. EXPLICITLY state: "I identified a standard treatment ([Drug Name]), but
   I have intervened to block it due to [Safety Constraint]."
3. Suggest a safe alternative if one is available.

STANDARD RULES:
1. Match by drug name or condition.
2. Be concise.

OUTPUT FORMAT:
"**Clinical Decision:** [Approved/Intervention]
 **Recommendation:** [Drug Name or 'None']
 **Reasoning:** [Explain the safety logic]
 **Safety Note:** [Warnings]""#,
        if profile.pregnancy_risk {
            "YES (High Risk)"
        } else {
            "No"
        },
        if profile.prescription_only_ok {
            "Any"
        } else {
            "Over-the-counter only"
        },
    )
}

fn user_message(query: &str, approved: &ApprovedCandidates) -> String {
    let mut context = String::new();
    for candidate in approved {
        context.push_str(&context_block(candidate));
    }
    format!("User Query: {query}\n\nAvailable Drug Data:\n{context}")
}

impl ISynthesizer for InferenceClient {
    fn synthesize(
        &self,
        query: &str,
        approved: &ApprovedCandidates,
        profile: &SafetyProfile,
    ) -> SafeMedsResult<String> {
        let messages = [
            ChatMessage {
                role: "system",
                content: system_prompt(profile),
            },
            ChatMessage {
                role: "user",
                content: user_message(query, approved),
            },
        ];
        let response = self.chat(&messages, SYNTHESIZE_TEMPERATURE)?;
        info!(
            candidates = approved.len(),
            chars = response.len(),
            "recommendation synthesized"
        );
        Ok(response)
    }
}
