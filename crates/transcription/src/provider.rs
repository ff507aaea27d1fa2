pub(crate) mod whisper;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::types::{Transcript, UpstreamAudio};

/// Trait for transcription provider implementations
#[async_trait]
pub(crate) trait TranscriptionProvider: Send + Sync {
    /// Transcribe staged audio to text
    async fn transcribe(&self, request: UpstreamAudio, credential: &SecretString) -> crate::error::Result<Transcript>;

    /// Get the provider name
    fn name(&self) -> &str;
}
