//! `OpenAI` chat completion API wire format, reduced to what this gateway sends

use serde::{Deserialize, Serialize};

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
}

/// `OpenAI` message within a request or response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    /// Message role
    pub role: String,
    /// Text content
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// `OpenAI` chat completion response
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    /// Generated choices; the first carries the completion
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Individual response choice
#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    /// Generated message
    pub message: ChatMessage,
}
