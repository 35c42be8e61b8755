use serde::{Deserialize, Serialize};

use super::defaults;

/// Hosted inference service configuration.
///
/// The API credential itself is read from the environment variable named by
/// `api_key_env`, never from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// Chat model used for classification and synthesis.
    pub chat_model: String,
    /// Audio model used for transcription.
    pub transcription_model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::INFERENCE_BASE_URL.to_string(),
            chat_model: defaults::INFERENCE_CHAT_MODEL.to_string(),
            transcription_model: defaults::INFERENCE_TRANSCRIPTION_MODEL.to_string(),
            api_key_env: defaults::INFERENCE_API_KEY_ENV.to_string(),
            timeout_secs: defaults::INFERENCE_TIMEOUT_SECS,
        }
    }
}
