use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use escriba_core::RequestContext;
use secrecy::SecretString;

use crate::{
    error::TranscribeError,
    types::TranscriptionRequest,
    validate::{allowed_extension, sanitize_filename},
};

/// Body limit for audio uploads (32 MiB)
///
/// Above the 25 MB audio ceiling so oversized uploads reach the size check
/// and get its specific error instead of a generic body-limit rejection.
pub(crate) const BODY_LIMIT_BYTES: usize = 32 << 20;

/// Content type assumed when the audio part does not declare one
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extractor for multipart uploads containing a dictated audio file
///
/// Accepts a required `file` part and an optional `api_key` text field
/// that overrides configured credentials. Filename validation happens
/// here, before any credential resolution or staging.
pub(crate) struct ExtractAudioUpload(pub RequestContext, pub TranscriptionRequest);

impl<S> FromRequest<S> for ExtractAudioUpload
where
    S: Send + Sync,
{
    type Rejection = TranscribeError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let rebuilt = http::Request::from_parts(parts.clone(), body);
        let mut multipart = Multipart::from_request(rebuilt, state)
            .await
            .map_err(|e| TranscribeError::Multipart(e.to_string()))?;

        let mut audio: Option<Vec<u8>> = None;
        let mut declared_filename: Option<String> = None;
        let mut content_type = DEFAULT_CONTENT_TYPE.to_string();
        let mut api_key: Option<SecretString> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| TranscribeError::Multipart(e.to_string()))?
        {
            match field.name() {
                Some("file") => {
                    declared_filename = field.file_name().map(str::to_string);
                    if let Some(ct) = field.content_type() {
                        content_type = ct.to_string();
                    }
                    audio = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| TranscribeError::Multipart(e.to_string()))?
                            .to_vec(),
                    );
                }
                Some("api_key") => {
                    let value = field.text().await.map_err(|e| TranscribeError::Multipart(e.to_string()))?;
                    if !value.is_empty() {
                        api_key = Some(SecretString::from(value));
                    }
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        let audio = audio.ok_or(TranscribeError::MissingFile)?;

        let declared_filename = declared_filename.unwrap_or_default();
        if declared_filename.is_empty() {
            return Err(TranscribeError::EmptyFilename);
        }
        if !allowed_extension(&declared_filename) {
            return Err(TranscribeError::DisallowedExtension);
        }

        let transcription_request = TranscriptionRequest {
            audio,
            filename: sanitize_filename(&declared_filename),
            content_type,
        };

        let context = RequestContext { parts, api_key };

        Ok(Self(context, transcription_request))
    }
}
