use escriba_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompleteError>;

/// Errors that can occur while completing a template
///
/// Display text doubles as the client-facing message; the API surface is
/// Spanish, matching the frontend.
#[derive(Debug, Error)]
pub enum CompleteError {
    /// Request carried no prompt text
    #[error("Prompt requerido")]
    EmptyPrompt,

    /// No credential at any source
    #[error("API key no configurada")]
    MissingCredential,

    /// Upstream provider returned a non-success status
    #[error("Error en OpenAI: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Request never produced an upstream response
    #[error("Error de conexión con OpenAI: {0}")]
    Connection(String),

    /// Unexpected failure parsing or handling the upstream response
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for CompleteError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt | Self::MissingCredential => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::Connection(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::EmptyPrompt => "invalid_request_error",
            Self::MissingCredential => "configuration_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Connection(_) => "connection_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl axum::response::IntoResponse for CompleteError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(error_type = self.error_type(), "completion request failed: {self}");

        let body = serde_json::json!({ "error": self.client_message() });

        (self.status_code(), axum::Json(body)).into_response()
    }
}
