use std::time::Duration;

use async_trait::async_trait;
use escriba_config::{TranscriptionConfig, UpstreamConfig};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::TranscribeError,
    http_client::http_client,
    types::{Transcript, UpstreamAudio},
};

use super::TranscriptionProvider;

/// Response format requested from Whisper
const RESPONSE_FORMAT: &str = "json";

/// Backoff before the single retry of a failed connection
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// `OpenAI` Whisper transcription provider
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    model: String,
    language: String,
}

impl WhisperProvider {
    pub fn new(upstream: &UpstreamConfig, transcription: &TranscriptionConfig) -> Self {
        let client = http_client(Duration::from_secs(upstream.timeout_seconds));
        let base_url = upstream.base_url.as_str().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            model: transcription.model.clone(),
            language: transcription.language.clone(),
        }
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    fn build_form(&self, request: &UpstreamAudio) -> crate::error::Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(request.audio.clone())
            .file_name(request.filename.clone())
            .mime_str(&request.content_type)
            .map_err(|e| TranscribeError::Internal(anyhow::anyhow!("invalid audio content type: {e}")))?;

        Ok(reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", RESPONSE_FORMAT))
    }

    async fn send(
        &self,
        request: &UpstreamAudio,
        credential: &SecretString,
    ) -> crate::error::Result<std::result::Result<reqwest::Response, reqwest::Error>> {
        let form = self.build_form(request)?;

        Ok(self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(credential.expose_secret())
            .multipart(form)
            .send()
            .await)
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    /// Transcript; an absent field reads as the empty transcript
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TranscriptionProvider for WhisperProvider {
    async fn transcribe(&self, request: UpstreamAudio, credential: &SecretString) -> crate::error::Result<Transcript> {
        tracing::debug!(
            "Whisper transcription request: {} bytes, model={}",
            request.audio.len(),
            self.model,
        );

        // One retry, only when the request never reached the upstream
        let mut retried = false;
        let response = loop {
            match self.send(&request, credential).await? {
                Ok(response) => break response,
                Err(e) if e.is_connect() && !retried => {
                    retried = true;
                    tracing::warn!("Whisper connection failed, retrying once: {e}");
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => {
                    tracing::error!("Whisper request failed: {e}");
                    return Err(TranscribeError::Connection(e.to_string()));
                }
            }
        };

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!("Whisper API error ({status}): {body}");

            return Err(TranscribeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            TranscribeError::Internal(anyhow::anyhow!("failed to parse Whisper response: {e}"))
        })?;

        tracing::debug!("Whisper transcription complete");

        Ok(Transcript { text: result.text })
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
