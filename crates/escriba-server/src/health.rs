use axum::Json;

/// Health check handler
pub(crate) async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Servidor funcionando correctamente",
    }))
}
