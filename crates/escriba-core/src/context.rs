use secrecy::SecretString;

/// Runtime context for upstream provider requests
///
/// Shared across the transcription and completion request flows.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP request parts (method, URI, headers)
    pub parts: http::request::Parts,
    /// Caller-supplied API key that takes precedence over configured keys
    pub api_key: Option<SecretString>,
}

impl RequestContext {
    /// Create a minimal context for non-HTTP use (tests, embedding)
    ///
    /// Contains empty headers and no override API key.
    pub fn empty() -> Self {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::GET)
            .uri("/")
            .body(())
            .expect("valid minimal request")
            .into_parts();

        Self { parts, api_key: None }
    }

    /// Access request headers
    pub fn headers(&self) -> &http::HeaderMap {
        &self.parts.headers
    }
}
