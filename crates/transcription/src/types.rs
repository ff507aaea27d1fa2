use serde::Serialize;

/// Validated inbound transcription request
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Sanitized filename, echoed back in the reply
    pub filename: String,
    /// Content type declared for the audio part
    pub content_type: String,
}

/// Success envelope returned to the frontend
#[derive(Debug, Serialize)]
pub struct TranscriptionReply {
    pub success: bool,
    /// Transcribed text from the upstream provider
    pub transcripcion: String,
    /// Filename the transcript belongs to
    pub archivo: String,
}

/// Audio payload as staged and forwarded upstream
#[derive(Debug)]
pub(crate) struct UpstreamAudio {
    pub audio: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Transcript extracted from the upstream response
#[derive(Debug)]
pub(crate) struct Transcript {
    pub text: String,
}
