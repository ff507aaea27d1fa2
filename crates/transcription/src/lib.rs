#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod request;
mod server;
mod staging;
mod types;
mod validate;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use escriba_config::{Config, CredentialStore};

pub use error::{Result, TranscribeError};
pub use server::{Server, TranscriptionServerBuilder};
pub use types::{TranscriptionReply, TranscriptionRequest};
use request::{BODY_LIMIT_BYTES, ExtractAudioUpload};

/// Build the transcription server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &Config, store: Arc<CredentialStore>) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TranscriptionServerBuilder::new(config, store)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for transcription
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/api/transcribir", post(transcribe))
        .layer(axum::extract::DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractAudioUpload(context, request): ExtractAudioUpload,
) -> Result<Json<TranscriptionReply>> {
    tracing::debug!(archivo = %request.filename, bytes = request.audio.len(), "transcription request received");

    let reply = server.transcribe(request, &context).await?;

    tracing::debug!("transcription complete");

    Ok(Json(reply))
}
