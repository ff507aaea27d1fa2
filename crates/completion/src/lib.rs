#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod protocol;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use escriba_config::{Config, CredentialStore};

pub use error::{CompleteError, Result};
pub use server::{CompletionServerBuilder, Server};
pub use types::{CompletionPayload, CompletionReply};

/// Build the template completion server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &Config, store: Arc<CredentialStore>) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        CompletionServerBuilder::new(config, store)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize completion server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for template completion
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/completar-plantilla", post(completar))
}

/// Handle template completion requests
async fn completar(
    State(server): State<Arc<Server>>,
    Json(payload): Json<CompletionPayload>,
) -> Result<Json<CompletionReply>> {
    tracing::debug!(prompt_chars = payload.prompt.len(), "template completion request received");

    let reply = server.complete(&payload).await?;

    tracing::debug!("template completion done");

    Ok(Json(reply))
}
