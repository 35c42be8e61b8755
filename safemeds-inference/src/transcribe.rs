//! Voice transcription: the alternate query source.

use tracing::info;

use safemeds_core::errors::{InferenceError, SafeMedsResult};
use safemeds_core::traits::ITranscriber;

use crate::client::InferenceClient;

#[derive(Debug, serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl ITranscriber for InferenceClient {
    fn transcribe(&self, audio: &[u8], filename: &str) -> SafeMedsResult<String> {
        let url = format!("{}/audio/transcriptions", self.config().base_url);

        let part = reqwest::blocking::multipart::Part::bytes(audio.to_vec())
            .file_name(filename.to_string());
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("model", self.config().transcription_model.clone())
            .text("response_format", "json")
            .text("temperature", "0");

        let response = self
            .http()
            .post(&url)
            .bearer_auth(self.bearer())
            .multipart(form)
            .send()
            .map_err(|e| InferenceError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::BadResponse {
                reason: format!("{status}: {body}"),
            }
            .into());
        }

        let body: TranscriptionResponse =
            response.json().map_err(|e| InferenceError::BadResponse {
                reason: format!("malformed transcription: {e}"),
            })?;

        info!(chars = body.text.len(), "audio transcribed");
        Ok(body.text)
    }
}
