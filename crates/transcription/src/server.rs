use std::path::PathBuf;
use std::sync::Arc;

use escriba_config::{Config, CredentialResolver, CredentialStore};
use escriba_core::RequestContext;

use crate::{
    error::TranscribeError,
    provider::{TranscriptionProvider, whisper::WhisperProvider},
    staging::StagedAudio,
    types::{TranscriptionReply, TranscriptionRequest, UpstreamAudio},
};

/// Hard ceiling on staged audio size, enforced before any upstream call
pub(crate) const MAX_AUDIO_BYTES: u64 = 25 * 1024 * 1024;

/// Transcription server: validate, stage, forward, clean up
pub struct Server {
    provider: Box<dyn TranscriptionProvider>,
    resolver: CredentialResolver,
    staging_dir: Option<PathBuf>,
}

impl Server {
    /// Transcribe an uploaded audio file
    ///
    /// Resolves the request credential, stages the audio to a temp file,
    /// enforces the size ceiling, and forwards to the provider. The staged
    /// file is removed on every exit path, success or failure.
    pub(crate) async fn transcribe(
        &self,
        request: TranscriptionRequest,
        context: &RequestContext,
    ) -> crate::error::Result<TranscriptionReply> {
        let credential = self
            .resolver
            .resolve(context.api_key.as_ref())
            .await
            .ok_or(TranscribeError::MissingCredential)?;

        let TranscriptionRequest {
            audio,
            filename,
            content_type,
        } = request;

        let staged = StagedAudio::create(self.staging_dir.as_deref(), audio)
            .await
            .map_err(|e| TranscribeError::Internal(anyhow::anyhow!("failed to stage audio: {e}")))?;

        tracing::debug!(path = %staged.path().display(), bytes = staged.size(), "audio staged");

        if staged.size() > MAX_AUDIO_BYTES {
            return Err(TranscribeError::FileTooLarge);
        }

        let audio = staged
            .read()
            .await
            .map_err(|e| TranscribeError::Internal(anyhow::anyhow!("failed to read staged audio: {e}")))?;

        let upstream = UpstreamAudio {
            audio,
            filename: filename.clone(),
            content_type,
        };

        let transcript = self.provider.transcribe(upstream, &credential).await?;

        Ok(TranscriptionReply {
            success: true,
            transcripcion: transcript.text,
            archivo: filename,
        })
    }
}

/// Builder for constructing the transcription server from configuration
pub struct TranscriptionServerBuilder<'a> {
    config: &'a Config,
    store: Arc<CredentialStore>,
}

impl<'a> TranscriptionServerBuilder<'a> {
    pub fn new(config: &'a Config, store: Arc<CredentialStore>) -> Self {
        Self { config, store }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let provider = WhisperProvider::new(&self.config.upstream, &self.config.upstream.transcription);

        tracing::debug!(provider = provider.name(), "transcription server initialized");

        Ok(Server {
            provider: Box::new(provider),
            resolver: CredentialResolver::new(&self.config.credentials, self.store),
            staging_dir: self.config.upstream.transcription.staging_dir.clone(),
        })
    }
}
