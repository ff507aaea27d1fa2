use std::time::Duration;

use async_trait::async_trait;
use escriba_config::{CompletionConfig, UpstreamConfig};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::CompleteError,
    http_client::http_client,
    protocol::{ChatMessage, ChatRequest, ChatResponse},
};

use super::CompletionProvider;

/// Standing instruction for the template completion exchange
///
/// The assistant fills template fields from the dictated findings and
/// leaves everything it cannot fill blank or marked as unspecified.
const SYSTEM_PROMPT: &str = "Eres un asistente médico especializado en completar plantillas médicas. \
    Debes respetar el formato de la plantilla y llenar solo los campos que puedas con la información \
    proporcionada. Si no hay información para un campo, déjalo en blanco o con [No especificado].";

/// Backoff before the single retry of a failed connection
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// `OpenAI` chat completion provider
pub(crate) struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiProvider {
    pub fn new(upstream: &UpstreamConfig, completion: &CompletionConfig) -> Self {
        let client = http_client(Duration::from_secs(upstream.timeout_seconds));
        let base_url = upstream.base_url.as_str().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            model: completion.model.clone(),
            max_tokens: completion.max_tokens,
            temperature: completion.temperature,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str, credential: &SecretString) -> crate::error::Result<String> {
        let wire_request = self.build_request(prompt);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "chat completion request");

        // One retry, only when the request never reached the upstream
        let mut retried = false;
        let response = loop {
            let attempt = self
                .client
                .post(self.completions_url())
                .bearer_auth(credential.expose_secret())
                .json(&wire_request)
                .send()
                .await;

            match attempt {
                Ok(response) => break response,
                Err(e) if e.is_connect() && !retried => {
                    retried = true;
                    tracing::warn!("OpenAI connection failed, retrying once: {e}");
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => {
                    tracing::error!("OpenAI request failed: {e}");
                    return Err(CompleteError::Connection(e.to_string()));
                }
            }
        };

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!("OpenAI API error ({status}): {body}");

            return Err(CompleteError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let result: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {e}");
            CompleteError::Internal(anyhow::anyhow!("failed to parse OpenAI response: {e}"))
        })?;

        let content = result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompleteError::Internal(anyhow::anyhow!("OpenAI response contained no choices")))?;

        tracing::debug!(result_chars = content.len(), "chat completion done");

        Ok(content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
