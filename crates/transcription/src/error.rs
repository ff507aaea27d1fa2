use escriba_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Errors that can occur while handling a transcription request
///
/// Display text doubles as the client-facing message; the API surface is
/// Spanish, matching the frontend.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Multipart body carried no `file` part
    #[error("No se proporcionó archivo")]
    MissingFile,

    /// File part present but the declared filename is empty
    #[error("No se seleccionó archivo")]
    EmptyFilename,

    /// Filename extension is not on the allow-list
    #[error("Tipo de archivo no permitido")]
    DisallowedExtension,

    /// Staged audio exceeds the upstream size ceiling
    #[error("El archivo es demasiado grande. El límite es 25MB")]
    FileTooLarge,

    /// No credential at any source
    #[error("API key no configurada")]
    MissingCredential,

    /// Malformed multipart body
    #[error("Petición multipart inválida: {0}")]
    Multipart(String),

    /// Upstream provider returned a non-success status
    #[error("Error en la API: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Request never produced an upstream response
    #[error("Error de conexión con la API: {0}")]
    Connection(String),

    /// Unexpected failure during staging or response parsing
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for TranscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::EmptyFilename
            | Self::DisallowedExtension
            | Self::FileTooLarge
            | Self::MissingCredential
            | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::Connection(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingFile | Self::EmptyFilename | Self::DisallowedExtension | Self::FileTooLarge | Self::Multipart(_) => {
                "invalid_request_error"
            }
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

impl axum::response::IntoResponse for TranscribeError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(error_type = self.error_type(), "transcription request failed: {self}");

        let body = serde_json::json!({ "error": self.client_message() });

        (self.status_code(), axum::Json(body)).into_response()
    }
}
