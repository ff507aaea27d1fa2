use serde::{Deserialize, Serialize};

/// Inbound template completion request body
#[derive(Debug, Deserialize)]
pub struct CompletionPayload {
    /// Template plus dictated findings to fill it with
    #[serde(default)]
    pub prompt: String,
}

/// Success envelope returned to the frontend
#[derive(Debug, Serialize)]
pub struct CompletionReply {
    pub success: bool,
    /// Completed template text
    pub result: String,
}
