use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use escriba_config::{CredentialStore, StoredConfig};
use http::StatusCode;
use serde::Deserialize;

/// Create the router for the credential configuration API
pub(crate) fn endpoint_router() -> Router<Arc<CredentialStore>> {
    Router::new().route("/api/config", get(get_config).post(save_config))
}

/// Handle `GET /api/config`
///
/// Returns the persisted document wholesale, as the frontend stores it.
async fn get_config(State(store): State<Arc<CredentialStore>>) -> Json<StoredConfig> {
    Json(store.load().await)
}

#[derive(Debug, Deserialize)]
struct SaveConfigPayload {
    #[serde(default)]
    api_key: Option<String>,
}

/// Handle `POST /api/config`
async fn save_config(State(store): State<Arc<CredentialStore>>, Json(payload): Json<SaveConfigPayload>) -> Response {
    let Some(api_key) = payload.api_key else {
        let body = serde_json::json!({ "error": "API key requerida" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    match store.save_api_key(&api_key).await {
        Ok(()) => {
            let body = serde_json::json!({ "success": true, "message": "Configuración guardada" });
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("failed to persist credential: {e}");
            let body = serde_json::json!({ "error": "Error al guardar configuración" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
